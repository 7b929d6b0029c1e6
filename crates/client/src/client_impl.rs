//! # ApiClient スーパートレイトとクライアント実装の構造体

use std::{sync::Arc, time::Duration};

use crate::{
    api_key_client::{ApiKeyClient, WebhookClient},
    auth_client::AuthClient,
    beneficiary_client::BeneficiaryClient,
    config::ClientConfig,
    organisation_client::OrganisationClient,
    otp_client::OtpClient,
    payment_client::PaymentClient,
    reference_client::ReferenceClient,
    token::TokenProvider,
    transfer_client::TransferClient,
};

/// API クライアントトレイト（スーパートレイト）
///
/// リソース別のサブトレイトを束ねるスーパートレイト。
/// テスト時にはサブトレイト単位でスタブを使用できる。
///
/// `dyn ApiClient` はオブジェクトセーフであり、
/// `Arc<dyn ApiClient>` として使用可能。
pub trait ApiClient:
    AuthClient
    + PaymentClient
    + TransferClient
    + BeneficiaryClient
    + ReferenceClient
    + OrganisationClient
    + ApiKeyClient
    + WebhookClient
    + OtpClient
{
}

/// ブランケット impl: すべてのサブトレイトを実装する型は
/// 自動的に `ApiClient` を実装する。
impl<T> ApiClient for T where
    T: AuthClient
        + PaymentClient
        + TransferClient
        + BeneficiaryClient
        + ReferenceClient
        + OrganisationClient
        + ApiKeyClient
        + WebhookClient
        + OtpClient
{
}

/// API クライアント実装
#[derive(Clone)]
pub struct ApiClientImpl {
    pub(crate) base_url: String,
    pub(crate) http:     reqwest::Client,
    pub(crate) timeout:  Duration,
    pub(crate) tokens:   Arc<dyn TokenProvider>,
}

impl ApiClientImpl {
    /// 新しい ApiClient を作成する
    ///
    /// # 引数
    ///
    /// - `config`: ベース URL とタイムアウト
    /// - `tokens`: リクエストごとに問い合わせる Bearer トークンの供給元
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            timeout: Duration::from_secs(config.timeout_secs),
            tokens,
        }
    }

    /// パスからフル URL を組み立てる
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET リクエストビルダー（認証ヘッダ付き）
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    /// POST リクエストビルダー（認証ヘッダ付き）
    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    /// PATCH リクエストビルダー（認証ヘッダ付き）
    pub(crate) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.patch(self.url(path)))
    }

    /// DELETE リクエストビルダー（認証ヘッダ付き）
    pub(crate) fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorize(self.http.delete(self.url(path)))
    }

    /// 現在のトークンを付与する（未認証ならそのまま）
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NoToken;

    fn make_client(api_url: &str) -> ApiClientImpl {
        let config = ClientConfig {
            api_url:      api_url.to_string(),
            timeout_secs: 30,
        };
        ApiClientImpl::new(&config, Arc::new(NoToken))
    }

    #[test]
    fn test_ベースurl末尾のスラッシュを取り除く() {
        let client = make_client("https://api.example.com/");

        assert_eq!(
            client.url("/payments"),
            "https://api.example.com/payments"
        );
    }

    #[test]
    fn test_スラッシュなしのベースurlはそのまま使う() {
        let client = make_client("https://api.example.com");

        assert_eq!(
            client.url("/transfers"),
            "https://api.example.com/transfers"
        );
    }
}
