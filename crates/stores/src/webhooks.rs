//! # Webhook ストア
//!
//! ## 1 キー 1 Webhook の規則
//!
//! サーバーは API キーごとの Webhook 数を制限しないが、複数登録すると
//! 配信順序の保証がなく通知が重複する。このストアはクライアント側の規則
//! として「1 つの API キーには最大 1 つの Webhook」を守る。既に Webhook を
//! 持つキーへの作成要求は既存 Webhook の更新に置き換えられ、呼び出し元には
//! [`WebhookWriteOutcome::UpdatedExisting`] でその旨を通知する（UI は
//! 「作成」と「既存の宛先を更新」を区別して表示できる）。
//!
//! 更新はサーバーのレスポンス DTO が確定値を持つため、一覧の再取得ではなく
//! その場の差し替えで反映する。新規作成は表示中ページを再取得する。

use std::sync::Arc;

use pesaflow_client::{
    CreateWebhookRequest,
    UpdateWebhookRequest,
    WebhookClient,
    WebhookDto,
};
use pesaflow_domain::{
    ids::{ApiKeyId, WebhookId},
    organisation::OrganisationId,
};
use pesaflow_shared::{Page, PageRequest, normalize};

use crate::{
    collection::{Collection, CollectionSnapshot},
    error::StoreError,
    registry::Resettable,
};

/// Webhook 一覧のラッパーキー
const WEBHOOK_WRAPPER_KEYS: &[&str] = &["webhooks"];

/// Webhook 書き込みの結果
///
/// 呼び出し元（UI）が「作成しました」と「既存の宛先を更新しました」を
/// 区別して表示できるようにする。
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookWriteOutcome {
    /// 新規に作成された
    Created(WebhookDto),
    /// 同じ API キーの既存 Webhook が更新された
    UpdatedExisting(WebhookDto),
}

/// Webhook ストア
pub struct WebhookStore {
    client:     Arc<dyn WebhookClient>,
    collection: Collection<WebhookDto>,
}

impl WebhookStore {
    pub fn new(client: Arc<dyn WebhookClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// Webhook 一覧をロードする
    ///
    /// 取得に失敗しても伝播せず、空ページへ退化する（警告ログのみ）。
    pub async fn load(&self, organisation_id: &OrganisationId, page: PageRequest) {
        let ticket = self.collection.begin_load();

        let result = self.client.list_webhooks(organisation_id, page).await;
        let normalized = match result {
            Ok(body) => normalize(WEBHOOK_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "webhook一覧の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// Webhook を作成または更新する
    ///
    /// 指定した API キーに既存の Webhook があれば**作成せず**その URL を
    /// 更新する（1 キー 1 Webhook の規則）。なければ新規に作成する。
    pub async fn create_or_update(
        &self,
        organisation_id: &OrganisationId,
        api_key_id: &ApiKeyId,
        url: &str,
    ) -> Result<WebhookWriteOutcome, StoreError> {
        let existing = self
            .collection
            .find(|item| item.api_key_id == api_key_id.as_str());

        match existing {
            Some(existing) => {
                let webhook_id = WebhookId::new(existing.id.clone());
                let req = UpdateWebhookRequest {
                    url: url.to_string(),
                };

                match self
                    .client
                    .update_webhook(organisation_id, &webhook_id, &req)
                    .await
                {
                    Ok(updated) => {
                        self.collection
                            .replace_item(|item| item.id == updated.id, updated.clone());
                        Ok(WebhookWriteOutcome::UpdatedExisting(updated))
                    }
                    Err(error) => {
                        let error = StoreError::from(error);
                        self.collection.record_write_error(error.clone());
                        Err(error)
                    }
                }
            }
            None => {
                let req = CreateWebhookRequest {
                    api_key_id: api_key_id.as_str().to_string(),
                    url:        url.to_string(),
                };

                match self.client.create_webhook(organisation_id, &req).await {
                    Ok(created) => {
                        self.reload_current(organisation_id).await;
                        Ok(WebhookWriteOutcome::Created(created))
                    }
                    Err(error) => {
                        let error = StoreError::from(error);
                        self.collection.record_write_error(error.clone());
                        Err(error)
                    }
                }
            }
        }
    }

    /// Webhook を削除する（楽観的反映）
    ///
    /// 失敗時は元の位置へ戻してエラーを伝播する。
    pub async fn delete(
        &self,
        organisation_id: &OrganisationId,
        webhook_id: &WebhookId,
    ) -> Result<(), StoreError> {
        let taken = self
            .collection
            .take_item(|item| item.id == webhook_id.as_str());

        match self.client.delete_webhook(organisation_id, webhook_id).await {
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

    /// API キーに紐づく Webhook を返す
    pub fn find_for_key(&self, api_key_id: &ApiKeyId) -> Option<WebhookDto> {
        self.collection
            .find(|item| item.api_key_id == api_key_id.as_str())
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<WebhookDto> {
        self.collection.snapshot()
    }

    async fn reload_current(&self, organisation_id: &OrganisationId) {
        let request = self.collection.current_request();
        self.load(organisation_id, request).await;
    }
}

impl Resettable for WebhookStore {
    fn name(&self) -> &'static str {
        "store:webhooks"
    }

    fn reset(&self) {
        self.collection.reset();
    }
}
