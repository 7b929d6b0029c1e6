//! # 決済関連の API クライアント

use async_trait::async_trait;
use pesaflow_domain::organisation::OrganisationId;
use pesaflow_shared::PageRequest;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::handle_response,
    types::ListFilters,
};

/// 決済関連の API クライアントトレイト
///
/// リストレスポンスの包装形はサーバー側で揺れがあるため、
/// ここではデシリアライズせず受信した JSON をそのまま返す。
/// 正規化はストア層が行う。
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// 組織内の決済一覧を取得する
    ///
    /// `GET /payments` を呼び出す。
    async fn list_payments(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError>;

    /// 組織内の決済の日次集計を取得する
    ///
    /// `GET /payments/grouped` を呼び出す。
    async fn list_grouped_payments(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError>;
}

#[async_trait]
impl PaymentClient for ApiClientImpl {
    async fn list_payments(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!(
            "/payments{}&organisation_id={}",
            filters.to_query(page),
            organisation_id
        );

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }

    async fn list_grouped_payments(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!(
            "/payments/grouped{}&organisation_id={}",
            filters.to_query(page),
            organisation_id
        );

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }
}
