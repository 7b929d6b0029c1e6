//! # リソースコレクション
//!
//! 各リソースストアが内部に持つページ付きコレクションの共通実装。
//!
//! ## 遅延レスポンスの防御
//!
//! ロード開始のたびに単調増加のシーケンス番号を発行し、完了時に照合する。
//! 古いチケットによる完了は黙って捨てられるため、遅延して届いたレスポンスが
//! 新しい状態を上書きすることはない。[`Collection::reset`] もシーケンスを
//! 進めるため、リセット前に飛んでいたリクエストの結果は無効化される。

use std::sync::{
    Mutex,
    PoisonError,
    atomic::{AtomicU64, Ordering},
};

use pesaflow_shared::{Page, PageMeta, PageRequest};

use crate::error::StoreError;

/// ロード開始時に発行されるチケット
///
/// 完了時に渡すことで、そのロードがまだ最新であるかを照合する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// コレクションの観測スナップショット
#[derive(Debug, Clone)]
pub struct CollectionSnapshot<T> {
    pub items:      Vec<T>,
    pub meta:       PageMeta,
    pub loading:    bool,
    pub last_error: Option<StoreError>,
}

struct Inner<T> {
    items:      Vec<T>,
    meta:       PageMeta,
    loading:    bool,
    last_error: Option<StoreError>,
}

impl<T> Inner<T> {
    fn empty() -> Self {
        Self {
            items:      Vec::new(),
            meta:       PageMeta::empty(PageRequest::first()),
            loading:    false,
            last_error: None,
        }
    }
}

/// ページ付きリソースコレクション
///
/// ロック（`std::sync::Mutex`）は await をまたいで保持しない。
/// ネットワーク呼び出しはチケットの発行と完了の間に、ロックの外で行う。
pub struct Collection<T> {
    inner: Mutex<Inner<T>>,
    seq:   AtomicU64,
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Collection<T> {
    /// 空のコレクションを作成する
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::empty()),
            seq:   AtomicU64::new(0),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// ロードを開始し、完了照合用のチケットを発行する
    pub fn begin_load(&self) -> LoadTicket {
        let ticket = LoadTicket(self.seq.fetch_add(1, Ordering::SeqCst) + 1);
        self.lock().loading = true;
        ticket
    }

    /// ロードを完了し、結果のページを反映する
    ///
    /// チケットが最新でなければ（後続のロードやリセットに追い越されていれば）
    /// 何も反映せず `false` を返す。照合はロックを取ってから行う。
    /// [`Collection::reset`] も同じロックの下でシーケンスを進めるため、
    /// 照合と反映の間にリセットが割り込むことはない。
    pub fn complete(&self, ticket: LoadTicket, page: Page<T>) -> bool {
        let mut inner = self.lock();

        if ticket.0 != self.seq.load(Ordering::SeqCst) {
            return false;
        }

        inner.items = page.items;
        inner.meta = page.meta;
        inner.loading = false;
        inner.last_error = None;
        true
    }

    /// 書き込みエラーを記録する（保持中のアイテムはそのまま）
    pub fn record_write_error(&self, error: StoreError) {
        self.lock().last_error = Some(error);
    }

    /// 条件に一致する最初のアイテムを取り除き、元の位置とともに返す
    ///
    /// 楽観的削除に使う。失敗時は [`Collection::restore_item`] で戻す。
    pub fn take_item(&self, pred: impl Fn(&T) -> bool) -> Option<(usize, T)> {
        let mut inner = self.lock();
        let index = inner.items.iter().position(pred)?;
        let item = inner.items.remove(index);
        Some((index, item))
    }

    /// アイテムを元の位置へ戻す（楽観的削除のロールバック）
    pub fn restore_item(&self, index: usize, item: T) {
        let mut inner = self.lock();
        let index = index.min(inner.items.len());
        inner.items.insert(index, item);
    }

    /// 条件に一致する最初のアイテムを置き換える
    pub fn replace_item(&self, pred: impl Fn(&T) -> bool, item: T) -> bool {
        let mut inner = self.lock();
        match inner.items.iter().position(pred) {
            Some(index) => {
                inner.items[index] = item;
                true
            }
            None => false,
        }
    }

    /// 条件に一致する最初のアイテムを複製して返す
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.lock().items.iter().find(|item| pred(item)).cloned()
    }

    /// 空の初期状態へ戻す
    ///
    /// シーケンスも進めるため、リセット前に開始されたロードの結果は
    /// 反映されなくなる。シーケンスの更新と状態のクリアはロックの下で
    /// まとめて行い、[`Collection::complete`] との割り込みを許さない。
    pub fn reset(&self) {
        let mut inner = self.lock();
        self.seq.fetch_add(1, Ordering::SeqCst);
        *inner = Inner::empty();
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        let inner = self.lock();
        CollectionSnapshot {
            items:      inner.items.clone(),
            meta:       inner.meta,
            loading:    inner.loading,
            last_error: inner.last_error.clone(),
        }
    }

    /// 現在表示中のページをリクエストとして返す（再取得用）
    pub fn current_request(&self) -> PageRequest {
        self.lock().meta.as_request()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page_of(items: Vec<i32>, page: u32) -> Page<i32> {
        let total = items.len() as u64;
        Page {
            meta: PageMeta {
                page,
                size: items.len() as u32,
                total,
            },
            items,
        }
    }

    #[test]
    fn test_ロード完了でアイテムとメタが反映される() {
        let collection = Collection::new();

        let ticket = collection.begin_load();
        let applied = collection.complete(ticket, page_of(vec![1, 2, 3], 1));

        assert!(applied);
        let snapshot = collection.snapshot();
        assert_eq!(snapshot.items, vec![1, 2, 3]);
        assert!(!snapshot.loading);
    }

    #[test]
    fn test_古いチケットの完了は無視される() {
        let collection = Collection::new();

        let stale = collection.begin_load();
        let fresh = collection.begin_load();
        collection.complete(fresh, page_of(vec![10], 1));

        // 先に発行されたチケットが遅れて完了しても上書きしない
        let applied = collection.complete(stale, page_of(vec![99], 1));

        assert!(!applied);
        assert_eq!(collection.snapshot().items, vec![10]);
    }

    #[test]
    fn test_リセットは進行中のロードを無効化する() {
        let collection = Collection::new();
        let ticket = collection.begin_load();

        collection.reset();
        let applied = collection.complete(ticket, page_of(vec![1], 1));

        assert!(!applied);
        assert!(collection.snapshot().items.is_empty());
    }

    #[test]
    fn test_resetと競合するロード完了は反映されない() {
        use std::{sync::Arc, thread};

        // タイミング依存の競合は繰り返しで炙り出す。complete が先にロックを
        // 取れば後から reset が消し、reset が先ならチケットが無効化される。
        // どちらの順序でも最終状態は必ず空になる。
        for _ in 0..200 {
            let collection = Arc::new(Collection::new());
            let ticket = collection.begin_load();

            let completer = {
                let collection = Arc::clone(&collection);
                thread::spawn(move || collection.complete(ticket, page_of(vec![1, 2, 3], 1)))
            };
            let resetter = {
                let collection = Arc::clone(&collection);
                thread::spawn(move || collection.reset())
            };
            completer.join().unwrap();
            resetter.join().unwrap();

            assert!(collection.snapshot().items.is_empty());
        }
    }

    #[test]
    fn test_リセットで空の初期状態に戻る() {
        let collection = Collection::new();
        let ticket = collection.begin_load();
        collection.complete(ticket, page_of(vec![1, 2], 3));

        collection.reset();

        let snapshot = collection.snapshot();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.meta.page, 1);
        assert_eq!(snapshot.meta.total, 0);
        assert!(!snapshot.loading);
        assert!(snapshot.last_error.is_none());
    }

    #[test]
    fn test_take_itemは位置とアイテムを返す() {
        let collection = Collection::new();
        let ticket = collection.begin_load();
        collection.complete(ticket, page_of(vec![10, 20, 30], 1));

        let taken = collection.take_item(|item| *item == 20);

        assert_eq!(taken, Some((1, 20)));
        assert_eq!(collection.snapshot().items, vec![10, 30]);
    }

    #[test]
    fn test_restore_itemは元の位置へ戻す() {
        let collection = Collection::new();
        let ticket = collection.begin_load();
        collection.complete(ticket, page_of(vec![10, 20, 30], 1));
        let (index, item) = collection.take_item(|item| *item == 20).unwrap();

        collection.restore_item(index, item);

        assert_eq!(collection.snapshot().items, vec![10, 20, 30]);
    }

    #[test]
    fn test_restore_itemは範囲外の位置を末尾に丸める() {
        let collection = Collection::new();
        let ticket = collection.begin_load();
        collection.complete(ticket, page_of(vec![10], 1));

        collection.restore_item(5, 99);

        assert_eq!(collection.snapshot().items, vec![10, 99]);
    }

    #[test]
    fn test_replace_itemは一致したアイテムだけを置き換える() {
        let collection = Collection::new();
        let ticket = collection.begin_load();
        collection.complete(ticket, page_of(vec![10, 20], 1));

        let replaced = collection.replace_item(|item| *item == 20, 21);

        assert!(replaced);
        assert_eq!(collection.snapshot().items, vec![10, 21]);
    }

    #[test]
    fn test_ロード完了で書き込みエラーがクリアされる() {
        let collection: Collection<i32> = Collection::new();
        collection.record_write_error(StoreError::Domain(
            pesaflow_domain::DomainError::Validation("テスト".to_string()),
        ));

        let ticket = collection.begin_load();
        collection.complete(ticket, page_of(vec![], 1));

        assert!(collection.snapshot().last_error.is_none());
    }
}
