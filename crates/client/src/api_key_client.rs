//! # API キー・Webhook の API クライアント

use async_trait::async_trait;
use pesaflow_domain::{
    ids::{ApiKeyId, WebhookId},
    organisation::OrganisationId,
};
use pesaflow_shared::PageRequest;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::{handle_response, handle_unit_response},
    types::{
        ApiKeyDto,
        CreateApiKeyRequest,
        CreateWebhookRequest,
        UpdateWebhookRequest,
        WebhookDto,
    },
};

/// API キー関連の API クライアントトレイト
#[async_trait]
pub trait ApiKeyClient: Send + Sync {
    /// 組織内の API キー一覧を取得する
    ///
    /// `GET /api-keys` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_api_keys(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError>;

    /// API キーを作成する
    ///
    /// `POST /api-keys` を呼び出す。
    async fn create_api_key(
        &self,
        organisation_id: &OrganisationId,
        req: &CreateApiKeyRequest,
    ) -> Result<ApiKeyDto, ApiError>;

    /// API キーを削除する
    ///
    /// `DELETE /api-keys/{id}` を呼び出す。
    async fn delete_api_key(
        &self,
        organisation_id: &OrganisationId,
        api_key_id: &ApiKeyId,
    ) -> Result<(), ApiError>;
}

/// Webhook 関連の API クライアントトレイト
///
/// サーバーは API キーごとの Webhook 数を制限しない。
/// 「1 キーにつき 1 Webhook」の規則はストア層が守る。
#[async_trait]
pub trait WebhookClient: Send + Sync {
    /// 組織内の Webhook 一覧を取得する
    ///
    /// `GET /webhooks` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_webhooks(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError>;

    /// Webhook を作成する
    ///
    /// `POST /webhooks` を呼び出す。
    async fn create_webhook(
        &self,
        organisation_id: &OrganisationId,
        req: &CreateWebhookRequest,
    ) -> Result<WebhookDto, ApiError>;

    /// Webhook を更新する
    ///
    /// `PATCH /webhooks/{id}` を呼び出す。
    async fn update_webhook(
        &self,
        organisation_id: &OrganisationId,
        webhook_id: &WebhookId,
        req: &UpdateWebhookRequest,
    ) -> Result<WebhookDto, ApiError>;

    /// Webhook を削除する
    ///
    /// `DELETE /webhooks/{id}` を呼び出す。
    async fn delete_webhook(
        &self,
        organisation_id: &OrganisationId,
        webhook_id: &WebhookId,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl ApiKeyClient for ApiClientImpl {
    async fn list_api_keys(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!(
            "/api-keys?page={}&size={}&organisation_id={}",
            page.page, page.size, organisation_id
        );

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }

    async fn create_api_key(
        &self,
        organisation_id: &OrganisationId,
        req: &CreateApiKeyRequest,
    ) -> Result<ApiKeyDto, ApiError> {
        let path = format!("/api-keys?organisation_id={organisation_id}");

        let response = self.post(&path).json(req).send().await?;
        handle_response(response).await
    }

    async fn delete_api_key(
        &self,
        organisation_id: &OrganisationId,
        api_key_id: &ApiKeyId,
    ) -> Result<(), ApiError> {
        let path = format!("/api-keys/{api_key_id}?organisation_id={organisation_id}");

        let response = self.delete(&path).send().await?;
        handle_unit_response(response).await
    }
}

#[async_trait]
impl WebhookClient for ApiClientImpl {
    async fn list_webhooks(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!(
            "/webhooks?page={}&size={}&organisation_id={}",
            page.page, page.size, organisation_id
        );

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }

    async fn create_webhook(
        &self,
        organisation_id: &OrganisationId,
        req: &CreateWebhookRequest,
    ) -> Result<WebhookDto, ApiError> {
        let path = format!("/webhooks?organisation_id={organisation_id}");

        let response = self.post(&path).json(req).send().await?;
        handle_response(response).await
    }

    async fn update_webhook(
        &self,
        organisation_id: &OrganisationId,
        webhook_id: &WebhookId,
        req: &UpdateWebhookRequest,
    ) -> Result<WebhookDto, ApiError> {
        let path = format!("/webhooks/{webhook_id}?organisation_id={organisation_id}");

        let response = self.patch(&path).json(req).send().await?;
        handle_response(response).await
    }

    async fn delete_webhook(
        &self,
        organisation_id: &OrganisationId,
        webhook_id: &WebhookId,
    ) -> Result<(), ApiError> {
        let path = format!("/webhooks/{webhook_id}?organisation_id={organisation_id}");

        let response = self.delete(&path).send().await?;
        handle_unit_response(response).await
    }
}
