//! # 決済ストア
//!
//! 受信した決済の一覧と日次集計。いずれも読み取り専用で、
//! 取得の失敗は空ページへの退化として扱う。

use std::sync::Arc;

use pesaflow_client::{GroupedPaymentDto, ListFilters, PaymentClient, PaymentDto};
use pesaflow_domain::organisation::OrganisationId;
use pesaflow_shared::{Page, PageRequest, normalize};

use crate::{
    collection::{Collection, CollectionSnapshot},
    registry::Resettable,
};

/// 決済一覧のラッパーキー（フランス語形を優先的に照合する）
const PAYMENT_WRAPPER_KEYS: &[&str] = &["paiements", "payments"];

/// 日次集計のラッパーキー
const GROUPED_WRAPPER_KEYS: &[&str] = &["paiementsGroupes", "grouped_payments"];

/// 決済ストア
pub struct PaymentStore {
    client:     Arc<dyn PaymentClient>,
    collection: Collection<PaymentDto>,
}

impl PaymentStore {
    pub fn new(client: Arc<dyn PaymentClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// 決済一覧をロードする
    ///
    /// 取得に失敗しても伝播せず、空ページへ退化する（警告ログのみ）。
    pub async fn load(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) {
        let ticket = self.collection.begin_load();

        let result = self.client.list_payments(organisation_id, page, filters).await;
        let normalized = match result {
            Ok(body) => normalize(PAYMENT_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "決済一覧の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<PaymentDto> {
        self.collection.snapshot()
    }
}

impl Resettable for PaymentStore {
    fn name(&self) -> &'static str {
        "store:payments"
    }

    fn reset(&self) {
        self.collection.reset();
    }
}

/// 決済の日次集計ストア
pub struct GroupedPaymentStore {
    client:     Arc<dyn PaymentClient>,
    collection: Collection<GroupedPaymentDto>,
}

impl GroupedPaymentStore {
    pub fn new(client: Arc<dyn PaymentClient>) -> Self {
        Self {
            client,
            collection: Collection::new(),
        }
    }

    /// 日次集計をロードする
    pub async fn load(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
        filters: &ListFilters,
    ) {
        let ticket = self.collection.begin_load();

        let result = self
            .client
            .list_grouped_payments(organisation_id, page, filters)
            .await;
        let normalized = match result {
            Ok(body) => normalize(GROUPED_WRAPPER_KEYS, page, &body),
            Err(error) => {
                tracing::warn!(error = %error, "決済集計の取得に失敗。空ページに退化");
                Page::empty(page)
            }
        };

        self.collection.complete(ticket, normalized);
    }

    /// 現在の状態のスナップショットを取得する
    pub fn snapshot(&self) -> CollectionSnapshot<GroupedPaymentDto> {
        self.collection.snapshot()
    }
}

impl Resettable for GroupedPaymentStore {
    fn name(&self) -> &'static str {
        "store:grouped_payments"
    }

    fn reset(&self) {
        self.collection.reset();
    }
}
