//! # 参照データの API クライアント
//!
//! 国・モバイルマネーサービスのリスト。組織スコープを持たない。

use async_trait::async_trait;
use pesaflow_shared::PageRequest;

use crate::{client_impl::ApiClientImpl, error::ApiError, response::handle_response};

/// 参照データの API クライアントトレイト
#[async_trait]
pub trait ReferenceClient: Send + Sync {
    /// 利用可能な国の一覧を取得する
    ///
    /// `GET /countries` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_countries(&self, page: PageRequest) -> Result<serde_json::Value, ApiError>;

    /// 利用可能なモバイルマネーサービスの一覧を取得する
    ///
    /// `GET /mobile-services` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_mobile_services(&self, page: PageRequest)
    -> Result<serde_json::Value, ApiError>;
}

#[async_trait]
impl ReferenceClient for ApiClientImpl {
    async fn list_countries(&self, page: PageRequest) -> Result<serde_json::Value, ApiError> {
        let path = format!("/countries?page={}&size={}", page.page, page.size);

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }

    async fn list_mobile_services(
        &self,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!("/mobile-services?page={}&size={}", page.page, page.size);

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }
}
