//! # PesaFlow API クライアント
//!
//! リモート決済 API との通信を担当する。
//!
//! ## 構成
//!
//! リソースごとにクライアントトレイトを定義し、単一の [`ApiClientImpl`] が
//! すべてを実装する。ストア層はサブトレイト単位で依存するため、テスト時には
//! 必要なトレイトだけをスタブできる。
//!
//! レスポンスボディの正規化（多様なリスト包装形の吸収）はこのクレートでは
//! 行わない。リストエンドポイントは受信した JSON をそのまま返し、解釈は
//! ストア層の責務とする。

pub mod api_key_client;
pub mod auth_client;
pub mod beneficiary_client;
pub mod client_impl;
pub mod config;
pub mod error;
pub mod organisation_client;
pub mod otp_client;
pub mod payment_client;
pub mod reference_client;
mod response;
pub mod token;
pub mod transfer_client;
pub mod types;

pub use api_key_client::{ApiKeyClient, WebhookClient};
pub use auth_client::AuthClient;
pub use beneficiary_client::BeneficiaryClient;
pub use client_impl::{ApiClient, ApiClientImpl};
pub use config::ClientConfig;
pub use error::ApiError;
pub use organisation_client::OrganisationClient;
pub use otp_client::OtpClient;
pub use payment_client::PaymentClient;
pub use reference_client::ReferenceClient;
pub use token::TokenProvider;
pub use transfer_client::TransferClient;
pub use types::{
    ApiKeyDto,
    BeneficiaryDto,
    CommitTransferRequest,
    CountryDto,
    CreateApiKeyRequest,
    CreateBeneficiaryRequest,
    CreateOrganisationRequest,
    CreateWebhookRequest,
    GroupedPaymentDto,
    ListFilters,
    LoginRequest,
    LoginResponse,
    MobileServiceDto,
    OrganisationDto,
    PaymentDto,
    TransferDto,
    UpdateBeneficiaryRequest,
    UpdateWebhookRequest,
    UserProfileDto,
    WebhookDto,
};
