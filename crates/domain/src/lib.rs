//! # PesaFlow ドメイン層
//!
//! クライアントコアのビジネスルールを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 送金額・電話番号・OTP コードなど、検証済みであることを
//!   型で保証する不変オブジェクト
//! - **ADT ステートマシン**: 送金ワークフローの状態遷移を代数的データ型で表現し、
//!   不正な状態を型レベルで防止する
//! - **ドメインエラー**: ネットワークに触れる前に短絡するバリデーション違反の表現
//!
//! ## 依存関係の方向
//!
//! ```text
//! stores → client → domain → shared
//! ```
//!
//! ドメイン層はリモート API にもストレージにも一切依存しない。

#[macro_use]
mod macros;

pub mod error;
pub mod ids;
pub mod organisation;
pub mod transfer;
pub mod value_objects;

pub use error::DomainError;
