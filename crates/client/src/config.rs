//! # クライアント設定
//!
//! 環境変数から API クライアントの設定を読み込む。

use std::env;

/// API クライアントの設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// リモート決済 API のベース URL
    pub api_url: String,
    /// リクエストタイムアウト（秒）
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("PESAFLOW_API_URL")
                .expect("PESAFLOW_API_URL が設定されていません（.env を確認してください）"),
            timeout_secs: env::var("PESAFLOW_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}
