//! # リストレスポンス正規化
//!
//! リモート API のリスト系エンドポイントは、エンドポイントや API
//! バージョンごとにエンベロープ形状が揃っていない。ここでは既知の形状を
//! タグ付きユニオン [`ListEnvelope`] として分類し、どの形状も単一の
//! [`Page<T>`] に写す。
//!
//! ## 既知の形状（マッチ優先順）
//!
//! 1. リソース名ラッパー: `{ "<リソース名>": { "content": [...], "page", "size", "total" } }`
//! 2. 素の配列: `[...]`
//! 3. data キー: `{ "data": [...] }`
//! 4. それ以外（null・不正形状） → 空ページ
//!
//! ## 契約
//!
//! [`normalize`] はどんな入力に対しても失敗しない。形状が不明な場合や
//! 要素のデコードに失敗した場合は空ページに退化する。ダッシュボードは
//! 「データなし」を表示して使い続けられることを、エラー表示より優先する。

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::page::{Page, PageMeta, PageRequest};

/// リスト系レスポンスの既知エンベロープ形状（タグ付きユニオン）
///
/// 形状判定を 1 箇所に集約することで、API の形状ドリフトの影響範囲を
/// この型と [`normalize`] に閉じ込める。ストア側は形状を一切知らない。
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// `{ "<リソース名>": { "content": [...], ...メタデータ } }`
    Wrapped {
        content: Vec<Value>,
        page:    Option<u32>,
        size:    Option<u32>,
        total:   Option<u64>,
    },
    /// `[...]`
    Bare(Vec<Value>),
    /// `{ "data": [...] }`
    Data(Vec<Value>),
    /// 不明・不正形状
    Malformed,
}

impl ListEnvelope {
    /// 生の JSON 値を既知の形状に分類する
    ///
    /// `wrapper_keys` はリソース族ごとのラッパーキー候補
    /// （サーバーのローカライズ済みリソース名。表記ゆれを許容するため複数指定可）。
    pub fn classify(wrapper_keys: &[&str], raw: &Value) -> Self {
        if let Value::Array(values) = raw {
            return Self::Bare(values.clone());
        }

        let Value::Object(map) = raw else {
            return Self::Malformed;
        };

        for key in wrapper_keys {
            if let Some(wrapped) = map.get(*key) {
                return Self::classify_wrapped(wrapped);
            }
        }

        match map.get("data") {
            Some(Value::Array(values)) => Self::Data(values.clone()),
            _ => Self::Malformed,
        }
    }

    /// ラッパーキー配下の値を分類する
    ///
    /// `{ "content": [...] }` を持つオブジェクトのみ有効。
    /// `null` や配列以外の `content` は不正形状として扱う。
    fn classify_wrapped(wrapped: &Value) -> Self {
        let Value::Object(inner) = wrapped else {
            return Self::Malformed;
        };

        let Some(Value::Array(content)) = inner.get("content") else {
            return Self::Malformed;
        };

        Self::Wrapped {
            content: content.clone(),
            page:    inner.get("page").and_then(Value::as_u64).map(|v| v as u32),
            size:    inner.get("size").and_then(Value::as_u64).map(|v| v as u32),
            total:   inner.get("total").and_then(Value::as_u64),
        }
    }
}

/// 生のリストレスポンスを正規化ページに写す
///
/// どの形状にもマッチしない入力、および要素のデコードに失敗した入力は
/// 空ページ（`total == 0`）に退化する。この関数がエラーを返すことはない。
///
/// # メタデータの解決規則
///
/// - ラッパー形状: サーバー提供のメタデータを優先し、欠損フィールドは
///   リクエスト値で補う。サーバーの `total` が要素数を下回る場合は
///   要素数まで引き上げる（`total >= items.len()` を常に保証）。
/// - 素の配列: `page` はリクエスト値、`size`/`total` は観測した要素数。
/// - data キー: `page`/`size` はリクエスト値、`total` は要素数。
pub fn normalize<T: DeserializeOwned>(
    wrapper_keys: &[&str],
    request: PageRequest,
    raw: &Value,
) -> Page<T> {
    match ListEnvelope::classify(wrapper_keys, raw) {
        ListEnvelope::Wrapped {
            content,
            page,
            size,
            total,
        } => {
            let Some(items) = decode_items(content) else {
                return Page::empty(request);
            };
            let len = items.len() as u64;
            Page {
                meta: PageMeta {
                    page:  page.unwrap_or(request.page).max(1),
                    size:  size.unwrap_or(request.size).max(1),
                    total: total.unwrap_or(len).max(len),
                },
                items,
            }
        }
        ListEnvelope::Bare(values) => {
            let Some(items) = decode_items::<T>(values) else {
                return Page::empty(request);
            };
            let len = items.len();
            if len == 0 {
                return Page::empty(request);
            }
            Page {
                meta: PageMeta {
                    page:  request.page,
                    size:  len as u32,
                    total: len as u64,
                },
                items,
            }
        }
        ListEnvelope::Data(values) => {
            let Some(items) = decode_items::<T>(values) else {
                return Page::empty(request);
            };
            let len = items.len() as u64;
            Page {
                meta: PageMeta {
                    page:  request.page,
                    size:  request.size,
                    total: len,
                },
                items,
            }
        }
        ListEnvelope::Malformed => Page::empty(request),
    }
}

/// JSON 値の列を型付き要素列にデコードする
///
/// 1 件でも失敗したら `None`（呼び出し側で空ページに退化）。
fn decode_items<T: DeserializeOwned>(values: Vec<Value>) -> Option<Vec<T>> {
    values
        .into_iter()
        .map(|value| serde_json::from_value(value).ok())
        .collect()
}
