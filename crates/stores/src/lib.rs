//! # PesaFlow リソースストア
//!
//! クライアント側の状態管理レイヤ。リソースごとのストア、組織コンテキスト、
//! OTP ゲート付き送金ワークフローを提供する。
//!
//! ## 設計原則
//!
//! - **組織スコープは明示引数**: スコープ付き操作はすべて
//!   `&OrganisationId` を引数で受け取る。アンビエントなグローバル状態に
//!   依存しない
//! - **読み取りは静かに退化**: リスト取得の失敗は空ページへの退化として
//!   扱い、エラーを伝播しない（ログには残す）
//! - **書き込みは明示的に失敗**: 作成・更新・削除の失敗は呼び出し元へ
//!   伝播し、ストアの `last_error` にも記録する
//! - **組織切り替え = 全ストアリセット**: [`registry::StoreRegistry`] に
//!   登録された全スコープ付きストアが切り替え時に一括で空に戻る

pub mod api_keys;
pub mod beneficiaries;
pub mod collection;
pub mod context;
pub mod error;
pub mod local_store;
pub mod organisation;
pub mod payments;
pub mod reference;
pub mod registry;
pub mod session;
pub mod transfer_flow;
pub mod transfers;
pub mod webhooks;

pub use api_keys::ApiKeyStore;
pub use beneficiaries::BeneficiaryStore;
pub use collection::{Collection, CollectionSnapshot, LoadTicket};
pub use context::StoreContext;
pub use error::StoreError;
pub use local_store::{FileLocalStore, LocalStore, MemoryLocalStore};
pub use organisation::OrganisationStore;
pub use payments::{GroupedPaymentStore, PaymentStore};
pub use reference::{CountryStore, MobileServiceStore};
pub use registry::{Resettable, StoreRegistry};
pub use session::{SessionStore, TokenCell};
pub use transfer_flow::TransferWorkflow;
pub use transfers::TransferStore;
pub use webhooks::{WebhookStore, WebhookWriteOutcome};
