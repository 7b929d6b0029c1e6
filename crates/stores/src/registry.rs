//! # StoreRegistry
//!
//! 組織スコープを持つ全ストアを集約し、一括リセットを提供する。
//!
//! 組織切り替えの正しさは「スコープ付きストアが 1 つ残らずリセットされる」
//! ことに懸かっている。各ストアを個別に列挙してリセットする方式は、ストアを
//! 追加したときの消し忘れを許してしまうため、登録制のレジストリに集約する。
//! 登録漏れは [`StoreRegistry::expected_store_names`] を使ったテストで検出する。

use std::sync::Arc;

/// 組織スコープ付きストアのリセットインターフェース
///
/// リセットは同期・不可失敗。メモリ上の状態を空に戻すだけで、
/// ネットワークにもディスクにも触れない。
pub trait Resettable: Send + Sync {
    /// ストア名（ログ・登録漏れ検出テスト用）
    fn name(&self) -> &'static str;

    /// 空の初期状態へ戻す
    fn reset(&self);
}

/// スコープ付きストアのレジストリ
#[derive(Default)]
pub struct StoreRegistry {
    stores: std::sync::Mutex<Vec<Arc<dyn Resettable>>>,
}

impl StoreRegistry {
    /// 空のレジストリを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// ストアを登録する
    pub fn register(&self, store: Arc<dyn Resettable>) {
        self.stores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(store);
    }

    /// 期待されるストア名の一覧を返す（登録漏れ検出テスト用）
    pub fn expected_store_names() -> Vec<&'static str> {
        vec![
            "store:payments",
            "store:grouped_payments",
            "store:transfers",
            "store:beneficiaries",
            "store:api_keys",
            "store:webhooks",
        ]
    }

    /// 登録済みストアの名前一覧を返す
    pub fn registered_names(&self) -> Vec<&'static str> {
        self.stores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|s| s.name())
            .collect()
    }

    /// 全ストアをリセットする
    ///
    /// 組織切り替え・ログアウト時に呼ばれる。
    pub fn reset_all(&self) {
        let stores = self
            .stores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        for store in stores.iter() {
            store.reset();
        }

        tracing::info!(count = stores.len(), "全スコープ付きストアをリセット");
    }
}
