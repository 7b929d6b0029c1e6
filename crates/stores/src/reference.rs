//! # 参照データストア
//!
//! 国・モバイルマネーサービスの一覧。組織スコープを持たないため
//! [`crate::registry::StoreRegistry`] には登録せず、組織切り替えでも
//! リセットされない。

use std::sync::Arc;

use pesaflow_client::{CountryDto, MobileServiceDto, ReferenceClient};
use pesaflow_shared::{Page, PageRequest, normalize};

use crate::collection::{Collection, CollectionSnapshot};

/// 国一覧のラッパーキー
const COUNTRY_WRAPPER_KEYS: &[&str] = &["pays", "countries"];

/// モバイルサービス一覧のラッパーキー
const SERVICE_WRAPPER_KEYS: &[&str] = &["services", "mobile_services"];

/// 参照データは件数が少ないため 1 ページで全件取得する
const REFERENCE_PAGE_SIZE: u32 = 100;

/// 国ストア
pub struct CountryStore {
    client:     Arc<dyn ReferenceClient>,
    collection: Collection<CountryDto>,
}

impl CountryStore {
    pub fn new(client: Arc<dyn ReferenceClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// 国一覧をロードする
    pub async fn load(&self) {
        let page = PageRequest::new(1, REFERENCE_PAGE_SIZE);
        let ticket = self.collection.begin_load();

        let normalized = match self.client.list_countries(page).await {
            Ok(body) => normalize(COUNTRY_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "国一覧の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<CountryDto> {
        self.collection.snapshot()
    }
}

/// モバイルマネーサービスストア
pub struct MobileServiceStore {
    client:     Arc<dyn ReferenceClient>,
    collection: Collection<MobileServiceDto>,
}

impl MobileServiceStore {
    pub fn new(client: Arc<dyn ReferenceClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// サービス一覧をロードする
    pub async fn load(&self) {
        let page = PageRequest::new(1, REFERENCE_PAGE_SIZE);
        let ticket = self.collection.begin_load();

        let normalized = match self.client.list_mobile_services(page).await {
            Ok(body) => normalize(SERVICE_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "モバイルサービス一覧の取得に失敗。空ページに退化"
                );
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<MobileServiceDto> {
        self.collection.snapshot()
    }
}
