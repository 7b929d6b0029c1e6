//! # OTP の API クライアント

use async_trait::async_trait;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::handle_unit_response,
    types::RequestOtpRequest,
};

/// OTP 関連の API クライアントトレイト
#[async_trait]
pub trait OtpClient: Send + Sync {
    /// OTP コードの発行を要求する
    ///
    /// `POST /otp/request` を呼び出す。リクエストには配信チャネルのみが載り、
    /// 送金ドラフトの内容は**一切含まれない**。コードの検証は送金コミット時に
    /// サーバー側で行われる。
    async fn request_otp(&self, channel: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl OtpClient for ApiClientImpl {
    async fn request_otp(&self, channel: &str) -> Result<(), ApiError> {
        let req = RequestOtpRequest {
            channel: channel.to_string(),
        };

        let response = self.post("/otp/request").json(&req).send().await?;
        handle_unit_response(response).await
    }
}
