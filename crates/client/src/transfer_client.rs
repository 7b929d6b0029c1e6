//! # 送金関連の API クライアント

use async_trait::async_trait;
use pesaflow_domain::organisation::OrganisationId;
use pesaflow_shared::PageRequest;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::handle_response,
    types::{CommitTransferRequest, ListFilters, TransferDto},
};

/// 送金関連の API クライアントトレイト
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// 組織内の送金一覧を取得する
    ///
    /// `GET /transfers` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_transfers(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError>;

    /// 送金をコミットする
    ///
    /// `POST /transfers` を呼び出す。ドラフトの内容と OTP コードを送信する
    /// 唯一のエンドポイント。
    async fn commit_transfer(
        &self,
        organisation_id: &OrganisationId,
        req: &CommitTransferRequest,
    ) -> Result<TransferDto, ApiError>;
}

#[async_trait]
impl TransferClient for ApiClientImpl {
    async fn list_transfers(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!(
            "/transfers{}&organisation_id={}",
            filters.to_query(page),
            organisation_id
        );

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }

    async fn commit_transfer(
        &self,
        organisation_id: &OrganisationId,
        req: &CommitTransferRequest,
    ) -> Result<TransferDto, ApiError> {
        let path = format!("/transfers?organisation_id={organisation_id}");

        let response = self.post(&path).json(req).send().await?;
        handle_response(response).await
    }
}
