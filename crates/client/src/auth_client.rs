//! # 認証の API クライアント

use async_trait::async_trait;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::{handle_response, handle_unit_response},
    types::{LoginRequest, LoginResponse, UserProfileDto},
};

/// 認証関連の API クライアントトレイト
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// ログインする
    ///
    /// `POST /auth/login` を呼び出し、セッショントークンとプロフィールを得る。
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// ログアウトする
    ///
    /// `POST /auth/logout` を呼び出し、サーバー側のセッションを失効させる。
    async fn logout(&self) -> Result<(), ApiError>;

    /// 認証ユーザーのプロフィールを取得する
    ///
    /// `GET /auth/me` を呼び出す。保存済みトークンの有効性確認を兼ねる。
    async fn fetch_profile(&self) -> Result<UserProfileDto, ApiError>;
}

#[async_trait]
impl AuthClient for ApiClientImpl {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self.post("/auth/login").json(req).send().await?;
        handle_response(response).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self.post("/auth/logout").send().await?;
        handle_unit_response(response).await
    }

    async fn fetch_profile(&self) -> Result<UserProfileDto, ApiError> {
        let response = self.get("/auth/me").send().await?;
        handle_response(response).await
    }
}
