//! # ストア層のエラー型

use pesaflow_client::ApiError;
use pesaflow_domain::DomainError;
use thiserror::Error;

/// ストア操作のエラー
///
/// 書き込み操作（作成・更新・削除・コミット）が返す。
/// 読み取り操作はエラーを返さず空ページへ退化する。
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// ドメイン検証・状態遷移エラー（ネットワークに到達する前に発生）
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// API 呼び出しエラー
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StoreError {
    /// ローカル検証で短絡したエラーかどうか
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
