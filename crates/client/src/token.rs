//! # 認証トークンの供給

/// リクエストに付与する Bearer トークンの供給元
///
/// クライアントはリクエスト送信のたびに現在のトークンを問い合わせる。
/// セッションストアがこのトレイトを実装することで、ログイン・ログアウトが
/// クライアントの再構築なしに即座へ反映される。
pub trait TokenProvider: Send + Sync {
    /// 現在の Bearer トークン（未認証なら None）
    fn bearer_token(&self) -> Option<String>;
}

/// 常に未認証を返す供給元（ログイン前のリクエスト用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}
