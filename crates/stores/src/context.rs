//! # ストアコンテキスト
//!
//! 全ストアの構築と配線。アプリケーションの起動時に一度だけ作られ、
//! 以降は `Arc` で共有される。

use std::sync::Arc;

use pesaflow_client::ApiClientImpl;

use crate::{
    api_keys::ApiKeyStore,
    beneficiaries::BeneficiaryStore,
    local_store::LocalStore,
    organisation::OrganisationStore,
    payments::{GroupedPaymentStore, PaymentStore},
    reference::{CountryStore, MobileServiceStore},
    registry::StoreRegistry,
    session::{SessionStore, TokenCell},
    transfer_flow::TransferWorkflow,
    transfers::TransferStore,
    webhooks::WebhookStore,
};

/// 全ストアを束ねるコンテキスト
pub struct StoreContext {
    pub session:          Arc<SessionStore>,
    pub organisations:    Arc<OrganisationStore>,
    pub payments:         Arc<PaymentStore>,
    pub grouped_payments: Arc<GroupedPaymentStore>,
    pub transfers:        Arc<TransferStore>,
    pub transfer_flow:    Arc<TransferWorkflow>,
    pub beneficiaries:    Arc<BeneficiaryStore>,
    pub countries:        Arc<CountryStore>,
    pub mobile_services:  Arc<MobileServiceStore>,
    pub api_keys:         Arc<ApiKeyStore>,
    pub webhooks:         Arc<WebhookStore>,
    pub registry:         Arc<StoreRegistry>,
}

impl StoreContext {
    /// 全ストアを構築し、組織スコープ付きストアをレジストリへ登録する
    ///
    /// `tokens` は `client` の構築に使った [`TokenCell`] と同じインスタンスを
    /// 渡すこと。セッションストアがここへトークンを書き込み、クライアントが
    /// リクエストのたびに読み出す。
    pub fn new(
        client: Arc<ApiClientImpl>,
        local: Arc<dyn LocalStore>,
        tokens: Arc<TokenCell>,
    ) -> Self {
        let registry = Arc::new(StoreRegistry::new());

        let payments = Arc::new(PaymentStore::new(client.clone()));
        let grouped_payments = Arc::new(GroupedPaymentStore::new(client.clone()));
        let transfers = Arc::new(TransferStore::new(client.clone()));
        let beneficiaries = Arc::new(BeneficiaryStore::new(client.clone()));
        let api_keys = Arc::new(ApiKeyStore::new(client.clone()));
        let webhooks = Arc::new(WebhookStore::new(client.clone()));

        registry.register(payments.clone());
        registry.register(grouped_payments.clone());
        registry.register(transfers.clone());
        registry.register(beneficiaries.clone());
        registry.register(api_keys.clone());
        registry.register(webhooks.clone());

        let countries = Arc::new(CountryStore::new(client.clone()));
        let mobile_services = Arc::new(MobileServiceStore::new(client.clone()));

        let organisations = Arc::new(OrganisationStore::new(
            client.clone(),
            local.clone(),
            registry.clone(),
        ));

        let session = Arc::new(SessionStore::new(
            client.clone(),
            local,
            tokens,
            organisations.clone(),
            registry.clone(),
        ));

        let transfer_flow = Arc::new(TransferWorkflow::new(
            client.clone(),
            client,
            transfers.clone(),
        ));

        Self {
            session,
            organisations,
            payments,
            grouped_payments,
            transfers,
            transfer_flow,
            beneficiaries,
            countries,
            mobile_services,
            api_keys,
            webhooks,
            registry,
        }
    }

    /// 起動時の状態復元（hydrate → サーバーとの突き合わせ）
    ///
    /// 1. ローカルからトークンと組織コンテキストを復元
    /// 2. トークンの有効性を確認
    /// 3. 有効なら組織リストをサーバーと突き合わせ
    pub async fn bootstrap(&self) {
        self.session.hydrate();
        self.organisations.hydrate();

        if self.session.validate().await {
            self.organisations.fetch_organisations().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_全スコープ付きストアがレジストリに登録される() {
        let tokens = Arc::new(TokenCell::new());
        let config = pesaflow_client::ClientConfig {
            api_url:      "http://localhost:8080".to_string(),
            timeout_secs: 5,
        };
        let client = Arc::new(ApiClientImpl::new(&config, tokens.clone()));
        let local = Arc::new(crate::local_store::MemoryLocalStore::new());

        let context = StoreContext::new(client, local, tokens);

        let mut registered = context.registry.registered_names();
        let mut expected = StoreRegistry::expected_store_names();
        registered.sort_unstable();
        expected.sort_unstable();

        // 登録漏れはここで検出される
        assert_eq!(registered, expected);
    }
}
