//! 組織切り替えの統合テスト
//!
//! スコープ付き全ストアのリセット、アクティブ組織の解決、
//! no-op 切り替えの不変条件を検証する。

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use pesaflow_client::{
    ApiError,
    BeneficiaryClient,
    BeneficiaryDto,
    CreateBeneficiaryRequest,
    CreateOrganisationRequest,
    ListFilters,
    OrganisationClient,
    OrganisationDto,
    PaymentClient,
    UpdateBeneficiaryRequest,
};
use pesaflow_domain::{ids::BeneficiaryId, organisation::OrganisationId};
use pesaflow_shared::PageRequest;
use pesaflow_stores::{
    BeneficiaryStore,
    LocalStore,
    MemoryLocalStore,
    OrganisationStore,
    PaymentStore,
    Resettable,
    StoreRegistry,
};
use serde_json::json;

// ===== スタブ =====

/// 常に 1 件の決済を返す決済クライアント
struct StubPaymentClient;

#[async_trait]
impl PaymentClient for StubPaymentClient {
    async fn list_payments(
        &self,
        _organisation_id: &OrganisationId,
        _page: PageRequest,
        _filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError> {
        Ok(json!({
            "paiements": {
                "content": [{
                    "id": "pay_1",
                    "amount": "2500.00",
                    "payer_phone": "+221771234567",
                    "reference": "REF-001",
                    "status": "completed",
                    "created_at": "2026-08-01T12:00:00Z"
                }],
                "page": 1,
                "size": 10,
                "total": 1
            }
        }))
    }

    async fn list_grouped_payments(
        &self,
        _organisation_id: &OrganisationId,
        _page: PageRequest,
        _filters: &ListFilters,
    ) -> Result<serde_json::Value, ApiError> {
        Ok(json!([]))
    }
}

/// 常に 1 件の受取人を返す受取人クライアント
struct StubBeneficiaryClient;

#[async_trait]
impl BeneficiaryClient for StubBeneficiaryClient {
    async fn list_beneficiaries(
        &self,
        _organisation_id: &OrganisationId,
        _page: PageRequest,
    ) -> Result<serde_json::Value, ApiError> {
        Ok(json!({
            "beneficiaires": {
                "content": [{"id": "bnf_1", "name": "Awa Diop", "phone": "+221771234567"}],
                "page": 1,
                "size": 10,
                "total": 1
            }
        }))
    }

    async fn create_beneficiary(
        &self,
        _organisation_id: &OrganisationId,
        _req: &CreateBeneficiaryRequest,
    ) -> Result<BeneficiaryDto, ApiError> {
        unimplemented!("このテストでは呼ばれない")
    }

    async fn update_beneficiary(
        &self,
        _organisation_id: &OrganisationId,
        _beneficiary_id: &BeneficiaryId,
        _req: &UpdateBeneficiaryRequest,
    ) -> Result<BeneficiaryDto, ApiError> {
        unimplemented!("このテストでは呼ばれない")
    }

    async fn delete_beneficiary(
        &self,
        _organisation_id: &OrganisationId,
        _beneficiary_id: &BeneficiaryId,
    ) -> Result<(), ApiError> {
        unimplemented!("このテストでは呼ばれない")
    }
}

/// 固定の組織リストを返す組織クライアント
struct StubOrganisationClient {
    organisations: Vec<OrganisationDto>,
}

#[async_trait]
impl OrganisationClient for StubOrganisationClient {
    async fn list_organisations(&self) -> Result<serde_json::Value, ApiError> {
        Ok(json!({
            "organisations": {
                "content": self.organisations,
                "page": 1,
                "size": 100,
                "total": self.organisations.len()
            }
        }))
    }

    async fn create_organisation(
        &self,
        _req: &CreateOrganisationRequest,
    ) -> Result<OrganisationDto, ApiError> {
        unimplemented!("このテストでは呼ばれない")
    }
}

/// 書き込み回数を数えるローカルストア
#[derive(Default)]
struct CountingLocalStore {
    inner:        MemoryLocalStore,
    write_count:  AtomicU64,
    remove_count: AtomicU64,
}

impl LocalStore for CountingLocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value);
    }

    fn remove(&self, key: &str) {
        self.remove_count.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key);
    }
}

/// リセット回数を数えるダミーストア
struct CountingResettable {
    reset_count: AtomicU64,
}

impl Resettable for CountingResettable {
    fn name(&self) -> &'static str {
        "store:counting"
    }

    fn reset(&self) {
        self.reset_count.fetch_add(1, Ordering::SeqCst);
    }
}

fn two_organisations() -> Vec<OrganisationDto> {
    vec![
        OrganisationDto {
            id:         "org_a".to_string(),
            name:       "Karibu Market".to_string(),
            reference:  Some("ORG-0001".to_string()),
            created_at: None,
        },
        OrganisationDto {
            id:         "org_b".to_string(),
            name:       "Duka Plus".to_string(),
            reference:  Some("ORG-0002".to_string()),
            created_at: None,
        },
    ]
}

fn make_org_store(
    local: Arc<dyn LocalStore>,
    registry: Arc<StoreRegistry>,
) -> OrganisationStore {
    OrganisationStore::new(
        Arc::new(StubOrganisationClient {
            organisations: two_organisations(),
        }),
        local,
        registry,
    )
}

// ===== テスト =====

#[tokio::test]
async fn test_組織切り替えで全スコープ付きストアが空に戻る() {
    let registry = Arc::new(StoreRegistry::new());
    let payments = Arc::new(PaymentStore::new(Arc::new(StubPaymentClient)));
    let beneficiaries = Arc::new(BeneficiaryStore::new(Arc::new(StubBeneficiaryClient)));
    registry.register(payments.clone());
    registry.register(beneficiaries.clone());

    let local: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
    let orgs = make_org_store(local, registry);
    orgs.fetch_organisations().await;

    let org_a = orgs.active_id().unwrap();
    assert_eq!(org_a, OrganisationId::new("org_a"));

    payments
        .load(&org_a, PageRequest::first(), &ListFilters::default())
        .await;
    beneficiaries.load(&org_a, PageRequest::first()).await;
    assert_eq!(payments.snapshot().items.len(), 1);
    assert_eq!(beneficiaries.snapshot().items.len(), 1);

    orgs.switch_to(&OrganisationId::new("org_b")).unwrap();

    // 切り替え後は旧組織のデータが一切残らない
    let payment_snapshot = payments.snapshot();
    let beneficiary_snapshot = beneficiaries.snapshot();
    assert!(payment_snapshot.items.is_empty());
    assert!(beneficiary_snapshot.items.is_empty());
    assert!(!payment_snapshot.loading);
    assert!(!beneficiary_snapshot.loading);
    assert_eq!(orgs.active_id(), Some(OrganisationId::new("org_b")));
}

#[tokio::test]
async fn test_同じ組織への切り替えはリセットも永続化も発生しない() {
    let registry = Arc::new(StoreRegistry::new());
    let counting = Arc::new(CountingResettable {
        reset_count: AtomicU64::new(0),
    });
    registry.register(counting.clone());

    let local = Arc::new(CountingLocalStore::default());
    let orgs = make_org_store(local.clone(), registry);
    orgs.fetch_organisations().await;

    let writes_before = local.write_count.load(Ordering::SeqCst);
    let active = orgs.active_id().unwrap();

    orgs.switch_to(&active).unwrap();

    assert_eq!(counting.reset_count.load(Ordering::SeqCst), 0);
    assert_eq!(local.write_count.load(Ordering::SeqCst), writes_before);
    assert_eq!(local.remove_count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_所属していない組織への切り替えは拒否される() {
    let registry = Arc::new(StoreRegistry::new());
    let local: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
    let orgs = make_org_store(local, registry);
    orgs.fetch_organisations().await;

    let result = orgs.switch_to(&OrganisationId::new("org_unknown"));

    assert!(result.is_err());
    // アクティブ組織は変わらない
    assert_eq!(orgs.active_id(), Some(OrganisationId::new("org_a")));
}

#[tokio::test]
async fn test_永続化されたダングリング組織idは先頭へフォールバックする() {
    let local: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
    // 前回のセッションでは org_zz がアクティブだったが、もう所属していない
    local.set("pesaflow.active_organisation", "org_zz");
    local.set(
        "pesaflow.organisations",
        r#"[{"id": "org_zz", "name": "Closed Shop"}]"#,
    );

    let registry = Arc::new(StoreRegistry::new());
    let orgs = make_org_store(local, registry);
    orgs.hydrate();
    assert_eq!(orgs.active_id(), Some(OrganisationId::new("org_zz")));

    // サーバーの最新リストには org_zz が存在しない
    orgs.fetch_organisations().await;

    assert_eq!(orgs.active_id(), Some(OrganisationId::new("org_a")));
}

#[tokio::test]
async fn test_hydrateはリストに存在しないアクティブidを復元しない() {
    let local: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
    // リストが空なのにアクティブ ID だけ残っている破損状態
    local.set("pesaflow.active_organisation", "org_a");

    let registry = Arc::new(StoreRegistry::new());
    let orgs = make_org_store(local, registry);
    orgs.hydrate();

    assert_eq!(orgs.active_id(), None);
}

#[tokio::test]
async fn test_切り替えでリロード世代が進む() {
    let registry = Arc::new(StoreRegistry::new());
    let local: Arc<dyn LocalStore> = Arc::new(MemoryLocalStore::new());
    let orgs = make_org_store(local, registry);
    orgs.fetch_organisations().await;

    let receiver = orgs.subscribe_reload();
    let epoch_before = *receiver.borrow();

    orgs.switch_to(&OrganisationId::new("org_b")).unwrap();

    assert_eq!(*receiver.borrow(), epoch_before + 1);
}
