//! # 正規化ページ
//!
//! すべてのリソースストアが収束する単一のページネーション形状。
//! リモート API のエンベロープ差異は [`crate::normalize`] がこの形状に吸収する。

use serde::{Deserialize, Serialize};

/// ページ取得リクエスト
///
/// ストアがコントローラに渡すページ指定。正規化時のフォールバック値にも使う。
///
/// # 不変条件
///
/// - `page >= 1`
/// - `size >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

/// デフォルトのページサイズ
const DEFAULT_PAGE_SIZE: u32 = 10;

impl PageRequest {
    /// ページ指定を作成する
    ///
    /// `page` と `size` はいずれも 1 未満を指定しても 1 に切り上げる。
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// 先頭ページ（page=1, size=10）
    pub fn first() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// ページメタデータ
///
/// [`Page<T>`] から要素列を除いた部分。ストアは `items` と並べてこれを保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page:  u32,
    pub size:  u32,
    pub total: u64,
}

impl PageMeta {
    /// 空ページのメタデータ
    ///
    /// `page`/`size` はリクエスト値を引き継ぎ、`total` は 0。
    pub fn empty(request: PageRequest) -> Self {
        Self {
            page:  request.page,
            size:  request.size,
            total: 0,
        }
    }

    /// このメタデータが指すページの再取得リクエストを返す
    ///
    /// 書き込み成功後の「現在ページの再取得」に使用する。
    pub fn as_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// 正規化済みページ
///
/// リモート API のどのエンベロープ形状から来たかによらず、
/// リスト読み取りの結果はすべてこの形に収束する。
///
/// # 不変条件
///
/// - `meta.page >= 1`
/// - `meta.total == 0` のとき `items` は空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta:  PageMeta,
}

impl<T> Page<T> {
    /// 空ページ
    ///
    /// 不正・未知の形状に対する退化先。`total == 0`、要素なし。
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            meta:  PageMeta::empty(request),
        }
    }
}
