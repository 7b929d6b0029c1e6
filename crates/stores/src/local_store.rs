//! # ローカル永続化
//!
//! 少数のキーだけを永続化する軽量なキーバリューストア。
//! セッショントークンとアクティブ組織の復元にのみ使用する。
//!
//! 永続化された値は常に「ヒント」として扱い、次回起動時にサーバーと
//! 突き合わせて再検証する。永続化の失敗はアプリの動作を止めない
//! （警告ログのみ）。

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

/// セッショントークンの保存キー
pub const KEY_AUTH_TOKEN: &str = "pesaflow.auth_token";
/// アクティブ組織 ID の保存キー
pub const KEY_ACTIVE_ORGANISATION: &str = "pesaflow.active_organisation";
/// 組織リストの保存キー（JSON 配列）
pub const KEY_ORGANISATIONS: &str = "pesaflow.organisations";

/// ローカルキーバリューストアのトレイト
///
/// 実装はすべてベストエフォート。保存の失敗を呼び出し元へ伝播しない。
pub trait LocalStore: Send + Sync {
    /// キーに対応する値を取得する
    fn get(&self, key: &str) -> Option<String>;

    /// 値を保存する
    fn set(&self, key: &str, value: &str);

    /// キーを削除する
    fn remove(&self, key: &str);
}

/// インメモリ実装（テスト・一時セッション用）
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// JSON ファイルベースの実装
///
/// ファイル全体を 1 つの JSON オブジェクトとして保持する。
/// 書き込みのたびにファイル全体を書き戻す（キー数は一桁なので十分）。
#[derive(Debug)]
pub struct FileLocalStore {
    path:   PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileLocalStore {
    /// ファイルから読み込んでストアを作成する
    ///
    /// ファイルが存在しない、または JSON として解釈できない場合は
    /// 空の状態から始める（破損ファイルでの起動失敗を避ける）。
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => parse_store_file(&content).unwrap_or_else(|| {
                tracing::warn!(
                    path = %path.display(),
                    "ローカルストアのファイルが破損しています。空の状態から始めます"
                );
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// 現在の内容をファイルへ書き戻す
    fn flush(&self, values: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(values) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(error = %error, "ローカルストアのシリアライズに失敗");
                return;
            }
        };

        if let Err(error) = std::fs::write(&self.path, json) {
            tracing::warn!(
                path = %self.path.display(),
                error = %error,
                "ローカルストアの書き込みに失敗"
            );
        }
    }
}

impl LocalStore for FileLocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        self.flush(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        self.flush(&values);
    }
}

/// ストアファイルの内容をパースする
fn parse_store_file(content: &str) -> Option<HashMap<String, String>> {
    serde_json::from_str(content).ok()
}
