//! # API キーストア

use std::sync::Arc;

use pesaflow_client::{ApiKeyClient, ApiKeyDto, CreateApiKeyRequest};
use pesaflow_domain::{ids::ApiKeyId, organisation::OrganisationId};
use pesaflow_shared::{Page, PageRequest, normalize};

use crate::{
    collection::{Collection, CollectionSnapshot},
    error::StoreError,
    registry::Resettable,
};

/// API キー一覧のラッパーキー
const API_KEY_WRAPPER_KEYS: &[&str] = &["cles", "api_keys"];

/// API キーストア
pub struct ApiKeyStore {
    client:     Arc<dyn ApiKeyClient>,
    collection: Collection<ApiKeyDto>,
}

impl ApiKeyStore {
    pub fn new(client: Arc<dyn ApiKeyClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// API キー一覧をロードする
    ///
    /// 取得に失敗しても伝播せず、空ページへ退化する（警告ログのみ）。
    pub async fn load(&self, organisation_id: &OrganisationId, page: PageRequest) {
        let ticket = self.collection.begin_load();

        let result = self.client.list_api_keys(organisation_id, page).await;
        let normalized = match result {
            Ok(body) => normalize(API_KEY_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "APIキー一覧の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// API キーを作成する
    ///
    /// 作成レスポンスにはキー本体の完全な値が含まれる。一覧の再取得では
    /// マスクされた値しか返らないため、返り値は呼び出し元が即座に表示する。
    pub async fn create(
        &self,
        organisation_id: &OrganisationId,
        label: &str,
    ) -> Result<ApiKeyDto, StoreError> {
        let req = CreateApiKeyRequest {
            label: label.trim().to_string(),
        };

        match self.client.create_api_key(organisation_id, &req).await {
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

    /// API キーを削除する（楽観的反映）
    ///
    /// 失敗時は元の位置へ戻してエラーを伝播する。
    /// キーに紐づく Webhook はサーバー側で一緒に削除されるため、
    /// 呼び出し元は Webhook ストアの再取得も行うこと。
    pub async fn delete(
        &self,
        organisation_id: &OrganisationId,
        api_key_id: &ApiKeyId,
    ) -> Result<(), StoreError> {
        let taken = self
            .collection
            .take_item(|item| item.id == api_key_id.as_str());

        match self.client.delete_api_key(organisation_id, api_key_id).await {
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

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<ApiKeyDto> {
        self.collection.snapshot()
    }

    async fn reload_current(&self, organisation_id: &OrganisationId) {
        let request = self.collection.current_request();
        self.load(organisation_id, request).await;
    }
}

impl Resettable for ApiKeyStore {
    fn name(&self) -> &'static str {
        "store:api_keys"
    }

    fn reset(&self) {
        self.collection.reset();
    }
}
