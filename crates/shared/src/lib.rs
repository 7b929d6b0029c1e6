//! # PesaFlow 共有ユーティリティ
//!
//! このクレートは、PesaFlow
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, client, stores）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - 外部クレートへの依存は最小限に抑える
//!
//! ## モジュール構成
//!
//! - [`page`] - 正規化済みページネーション型（全ストアが収束する単一形状）
//! - [`normalize`] - リモート API の不揃いなリストレスポンスの正規化
//! - [`error_body`] - リモート API のエラーエンベロープ `{ "error": {...} }`
//! - [`observability`] - トレーシング初期化（feature `observability`）

pub mod error_body;
pub mod normalize;
pub mod observability;
pub mod page;

pub use error_body::ErrorBody;
pub use normalize::{ListEnvelope, normalize};
pub use page::{Page, PageMeta, PageRequest};
