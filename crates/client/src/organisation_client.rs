//! # 組織関連の API クライアント

use async_trait::async_trait;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::handle_response,
    types::{CreateOrganisationRequest, OrganisationDto},
};

/// 組織関連の API クライアントトレイト
#[async_trait]
pub trait OrganisationClient: Send + Sync {
    /// 認証ユーザーが所属する組織の一覧を取得する
    ///
    /// `GET /organisations` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_organisations(&self) -> Result<serde_json::Value, ApiError>;

    /// 組織を作成する
    ///
    /// `POST /organisations` を呼び出す。
    async fn create_organisation(
        &self,
        req: &CreateOrganisationRequest,
    ) -> Result<OrganisationDto, ApiError>;
}

#[async_trait]
impl OrganisationClient for ApiClientImpl {
    async fn list_organisations(&self) -> Result<serde_json::Value, ApiError> {
        let response = self.get("/organisations").send().await?;
        handle_response(response).await
    }

    async fn create_organisation(
        &self,
        req: &CreateOrganisationRequest,
    ) -> Result<OrganisationDto, ApiError> {
        let response = self.post("/organisations").json(req).send().await?;
        handle_response(response).await
    }
}
