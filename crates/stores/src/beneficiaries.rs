//! # 受取人ストア
//!
//! 登録済み受取人の CRUD。作成・更新は成功後に表示中のページを再取得し、
//! 削除は楽観的に反映して失敗時にロールバックする。

use std::sync::Arc;

use pesaflow_client::{
    BeneficiaryClient,
    BeneficiaryDto,
    CreateBeneficiaryRequest,
    UpdateBeneficiaryRequest,
};
use pesaflow_domain::{
    ids::BeneficiaryId,
    organisation::OrganisationId,
    value_objects::{PhoneNumber, RecipientName},
};
use pesaflow_shared::{Page, PageRequest, normalize};

use crate::{
    collection::{Collection, CollectionSnapshot},
    error::StoreError,
    registry::Resettable,
};

/// 受取人一覧のラッパーキー
const BENEFICIARY_WRAPPER_KEYS: &[&str] = &["beneficiaires", "beneficiaries"];

/// 受取人ストア
pub struct BeneficiaryStore {
    client:     Arc<dyn BeneficiaryClient>,
    collection: Collection<BeneficiaryDto>,
}

impl BeneficiaryStore {
    pub fn new(client: Arc<dyn BeneficiaryClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// 受取人一覧をロードする
    ///
    /// 取得に失敗しても伝播せず、空ページへ退化する（警告ログのみ）。
    pub async fn load(&self, organisation_id: &OrganisationId, page: PageRequest) {
        let ticket = self.collection.begin_load();

        let result = self.client.list_beneficiaries(organisation_id, page).await;
        let normalized = match result {
            Ok(body) => normalize(BENEFICIARY_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "受取人一覧の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// 受取人を登録する
    ///
    /// 成功後に表示中のページを再取得して反映する。
    ///
    /// # Errors
    ///
    /// - `StoreError::Domain`: 名前・電話番号の検証エラー（ネットワーク到達前）
    /// - `StoreError::Api`: サーバーエラー
    pub async fn create(
        &self,
        organisation_id: &OrganisationId,
        name: &str,
        phone: &str,
    ) -> Result<BeneficiaryDto, StoreError> {
        let name = RecipientName::new(name)?;
        let phone = PhoneNumber::new(phone)?;

        let req = CreateBeneficiaryRequest {
            name:  name.as_str().to_string(),
            phone: phone.as_str().to_string(),
        };

        match self.client.create_beneficiary(organisation_id, &req).await {
            Ok(created) => {
                self.reload_current(organisation_id).await;
                Ok(created)
            }
            Err(error) => {
                let error = StoreError::from(error);
                self.collection.record_write_error(error.clone());
                Err(error)
            }
        }
    }

    /// 受取人を更新する
    ///
    /// 成功後に表示中のページを再取得して反映する。
    pub async fn update(
        &self,
        organisation_id: &OrganisationId,
        beneficiary_id: &BeneficiaryId,
        name: &str,
        phone: &str,
    ) -> Result<BeneficiaryDto, StoreError> {
        let name = RecipientName::new(name)?;
        let phone = PhoneNumber::new(phone)?;

        let req = UpdateBeneficiaryRequest {
            name:  name.as_str().to_string(),
            phone: phone.as_str().to_string(),
        };

        match self
            .client
            .update_beneficiary(organisation_id, beneficiary_id, &req)
            .await
        {
            Ok(updated) => {
                self.reload_current(organisation_id).await;
                Ok(updated)
            }
            Err(error) => {
                let error = StoreError::from(error);
                self.collection.record_write_error(error.clone());
                Err(error)
            }
        }
    }

    /// 受取人を削除する（楽観的反映）
    ///
    /// 先にローカルから取り除いてから API を呼ぶ。失敗時は元の位置へ戻して
    /// エラーを伝播する。
    pub async fn delete(
        &self,
        organisation_id: &OrganisationId,
        beneficiary_id: &BeneficiaryId,
    ) -> Result<(), StoreError> {
        let taken = self
            .collection
            .take_item(|item| item.id == beneficiary_id.as_str());

        match self
            .client
            .delete_beneficiary(organisation_id, beneficiary_id)
            .await
        {
            Ok(()) => Ok(()),
            Err(error) => {
                if let Some((index, item)) = taken {
                    self.collection.restore_item(index, item);
                }
                let error = StoreError::from(error);
                self.collection.record_write_error(error.clone());
                Err(error)
            }
        }
    }

    /// ID で受取人を検索する（送金フォームの解決用）
    pub fn find(&self, beneficiary_id: &BeneficiaryId) -> Option<BeneficiaryDto> {
        self.collection
            .find(|item| item.id == beneficiary_id.as_str())
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<BeneficiaryDto> {
        self.collection.snapshot()
    }

    async fn reload_current(&self, organisation_id: &OrganisationId) {
        let request = self.collection.current_request();
        self.load(organisation_id, request).await;
    }
}

impl Resettable for BeneficiaryStore {
    fn name(&self) -> &'static str {
        "store:beneficiaries"
    }

    fn reset(&self) {
        self.collection.reset();
    }
}
