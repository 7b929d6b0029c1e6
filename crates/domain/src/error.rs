//! # ドメイン層エラー定義
//!
//! クライアント側バリデーション違反と不正な状態遷移を表現するエラー型。
//! いずれもネットワーク呼び出しの**前**に短絡するエラーであり、
//! リモート API 由来のエラーはクライアント層の `ApiError` が担う。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// # 設計判断
///
/// - `thiserror` を使用し、`std::error::Error` トレイトを自動実装
/// - `Clone` derive により、ストアの `last_error` として保持可能
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値がビジネスルールに違反している場合に使用する。
    ///
    /// # 例
    ///
    /// - 送金額が 0 以下
    /// - OTP コードが 4 桁の数字でない
    /// - 受取人の指定方法（登録済み/手入力）が排他になっていない
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 不正な状態遷移
    ///
    /// ワークフローステートマシンが現在の状態で許可していない操作。
    #[error("不正な状態遷移です: {0}")]
    InvalidTransition(String),
}
