//! # 送金ストア
//!
//! コミット済み送金の一覧。送金の作成はこのストアではなく
//! [`crate::transfer_flow::TransferWorkflow`] が担い、コミット成功後に
//! このストアの表示中ページを再取得する。

use std::sync::Arc;

use pesaflow_client::{ListFilters, TransferClient, TransferDto};
use pesaflow_domain::organisation::OrganisationId;
use pesaflow_shared::{Page, PageRequest, normalize};

use crate::{
    collection::{Collection, CollectionSnapshot},
    registry::Resettable,
};

/// 送金一覧のラッパーキー
const TRANSFER_WRAPPER_KEYS: &[&str] = &["transferts", "transfers"];

/// 送金ストア
pub struct TransferStore {
    client:     Arc<dyn TransferClient>,
    collection: Collection<TransferDto>,
}

impl TransferStore {
    pub fn new(client: Arc<dyn TransferClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// 送金一覧をロードする
    ///
    /// 取得に失敗しても伝播せず、空ページへ退化する（警告ログのみ）。
    pub async fn load(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) {
        let ticket = self.collection.begin_load();

        let result = self
            .client
            .list_transfers(organisation_id, page, filters)
            .await;
        let normalized = match result {
            Ok(body) => normalize(TRANSFER_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "送金一覧の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// 表示中のページを再取得する（コミット成功後の反映用）
    pub async fn reload_current(&self, organisation_id: &OrganisationId) {
        let request = self.collection.current_request();
        self.load(organisation_id, request, &ListFilters::default())
            .await;
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<TransferDto> {
        self.collection.snapshot()
    }
}

impl Resettable for TransferStore {
    fn name(&self) -> &'static str {
        "store:transfers"
    }

    fn reset(&self) {
        self.collection.reset();
    }
}
