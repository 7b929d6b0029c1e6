//! # リモート API エラーエンベロープ
//!
//! 非 2xx レスポンスのボディ `{ "error": { "code", "message" } }` を表す型。
//! エンベロープを持たないレスポンスはクライアント層がステータス行から合成する。

use serde::{Deserialize, Serialize};

/// リモート API の構造化エラー
///
/// `code` はサーバー定義のエラーコード（例: `"otp_invalid"`）。
/// エンベロープに `code` が無い場合は空文字列になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code:    String,
    pub message: String,
}

/// デシリアライズ専用の外側エンベロープ
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

impl ErrorBody {
    /// レスポンスボディからエラーエンベロープを取り出す
    ///
    /// `{ "error": { ... } }` 形式でなければ `None`。
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}
