//! # API クライアントのエラー型

use thiserror::Error;

/// API クライアントエラー
///
/// エラーは発生箇所で 2 種に分類する:
///
/// - [`ApiError::Remote`]: サーバーが非 2xx を返した。構造化エラーボディが
///   あればそのコードとメッセージを、なければステータスから合成したコードを持つ
/// - [`ApiError::Network`]: レスポンスが得られなかった（接続失敗・タイムアウト・
///   成功レスポンスのデコード失敗）
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// サーバーがエラーレスポンスを返した
    #[error("リモートエラー [{code}] ({status}): {message}")]
    Remote {
        /// サーバー定義のエラーコード。エラーボディが構造化されていない場合は
        /// `http_<status>` 形式の合成コード
        code:    String,
        message: String,
        status:  u16,
    },

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),
}

impl ApiError {
    /// HTTP ステータスコード（ネットワークエラーなら None）
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }

    /// 認証エラー（401）かどうか
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
