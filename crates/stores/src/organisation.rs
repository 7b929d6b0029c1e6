//! # 組織ストア
//!
//! アクティブ組織の管理と組織切り替え。
//!
//! ## 初期化の 2 段階
//!
//! 1. **hydrate**: ローカルに永続化された組織リストとアクティブ ID を
//!    ネットワークなしで復元する（即座に UI を描画できる）
//! 2. **fetch_organisations**: サーバーの最新リストと突き合わせる。
//!    永続化されたアクティブ ID がリストに存在しなければダングリング参照と
//!    みなし、リスト先頭へフォールバックする
//!
//! ## 切り替えの順序
//!
//! 切り替えは「全スコープ付きストアのリセット」→「新しいアクティブ ID の
//! 公開」の順で行う。逆にすると、リセット完了前に新しい ID で発行された
//! ロードまで巻き添えで無効化してしまう。

use std::sync::{Arc, Mutex, PoisonError};

use pesaflow_client::{CreateOrganisationRequest, OrganisationClient, OrganisationDto};
use pesaflow_domain::{DomainError, organisation::{OrganisationId, OrganisationName}};
use pesaflow_shared::{PageRequest, normalize};
use tokio::sync::watch;

use crate::{
    error::StoreError,
    local_store::{KEY_ACTIVE_ORGANISATION, KEY_ORGANISATIONS, LocalStore},
    registry::StoreRegistry,
};

/// 組織一覧のラッパーキー
const ORGANISATION_WRAPPER_KEYS: &[&str] = &["organisations"];

/// 組織一覧は件数が少ないため 1 ページで全件取得する
const ORGANISATION_PAGE_SIZE: u32 = 100;

struct OrgState {
    organisations: Vec<OrganisationDto>,
    active:        Option<OrganisationId>,
    loading:       bool,
}

/// 組織ストア
pub struct OrganisationStore {
    client:    Arc<dyn OrganisationClient>,
    local:     Arc<dyn LocalStore>,
    registry:  Arc<StoreRegistry>,
    state:     Mutex<OrgState>,
    reload_tx: watch::Sender<u64>,
}

impl OrganisationStore {
    pub fn new(
        client: Arc<dyn OrganisationClient>,
        local: Arc<dyn LocalStore>,
        registry: Arc<StoreRegistry>,
    ) -> Self {
        let (reload_tx, _) = watch::channel(0);
        Self {
            client,
            local,
            registry,
            state: Mutex::new(OrgState {
                organisations: Vec::new(),
                active:        None,
                loading:       false,
            }),
            reload_tx,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OrgState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// ローカル永続化から前回の状態を復元する（ネットワークなし）
    ///
    /// 永続化されたアクティブ ID がリストに存在しなければ先頭へ
    /// フォールバックするが、フォールバック値は**永続化しない**
    /// （続く突き合わせで上書きされる暫定値のため）。
    ///
    /// 復元された値はヒントにすぎない。続けて
    /// [`OrganisationStore::fetch_organisations`] でサーバーと突き合わせること。
    pub fn hydrate(&self) {
        let organisations: Vec<OrganisationDto> = self
            .local
            .get(KEY_ORGANISATIONS)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();

        let active = self
            .local
            .get(KEY_ACTIVE_ORGANISATION)
            .map(OrganisationId::new)
            .filter(|id| organisations.iter().any(|org| org.id == id.as_str()))
            .or_else(|| {
                organisations
                    .first()
                    .map(|org| OrganisationId::new(org.id.clone()))
            });

        let mut state = self.lock();
        state.organisations = organisations;
        state.active = active;
    }

    /// サーバーから組織一覧を取得し、アクティブ組織を再解決する
    ///
    /// アクティブ組織の解決規則:
    ///
    /// 1. 現在のアクティブ ID が新しいリストに存在すれば維持
    /// 2. 存在しなければ（ダングリング参照）リスト先頭へフォールバック
    /// 3. リストが空なら None
    ///
    /// 取得に失敗した場合は現在の状態を維持する（復元済みのリストで
    /// 操作を続けられる方が、空にしてしまうより安全）。
    pub async fn fetch_organisations(&self) {
        {
            self.lock().loading = true;
        }

        let request = PageRequest::new(1, ORGANISATION_PAGE_SIZE);
        let body = match self.client.list_organisations().await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(error = %error, "組織一覧の取得に失敗。現在の状態を維持");
                self.lock().loading = false;
                return;
            }
        };

        let page = normalize::<OrganisationDto>(ORGANISATION_WRAPPER_KEYS, request, &body);
        let organisations = page.items;

        let (resolved, changed) = {
            let mut state = self.lock();
            let previous = state.active.clone();

            let resolved = previous
                .filter(|id| organisations.iter().any(|org| org.id == id.as_str()))
                .or_else(|| {
                    organisations
                        .first()
                        .map(|org| OrganisationId::new(org.id.clone()))
                });
            let changed = resolved != state.active || organisations != state.organisations;

            state.organisations = organisations;
            state.active = resolved.clone();
            state.loading = false;
            (resolved, changed)
        };

        // 永続化は実際に変化したときだけ行う
        if changed {
            self.persist(&resolved);
        }
    }

    /// アクティブ組織を切り替える
    ///
    /// 既にアクティブな組織への切り替えは完全な no-op（リセットも永続化も
    /// 発生しない）。所属していない組織の ID は検証エラー。
    ///
    /// リセットは新しい ID の公開**前**に行う。
    pub fn switch_to(&self, organisation_id: &OrganisationId) -> Result<(), StoreError> {
        {
            let state = self.lock();

            if state.active.as_ref() == Some(organisation_id) {
                return Ok(());
            }

            if !state
                .organisations
                .iter()
                .any(|org| org.id == organisation_id.as_str())
            {
                return Err(StoreError::Domain(DomainError::Validation(format!(
                    "所属していない組織には切り替えられません: {organisation_id}"
                ))));
            }
        }

        self.registry.reset_all();

        {
            let mut state = self.lock();
            state.active = Some(organisation_id.clone());
        }

        self.persist(&Some(organisation_id.clone()));

        // リロード世代を進め、購読中のコントローラに再取得を促す
        self.reload_tx.send_modify(|epoch| *epoch += 1);

        tracing::info!(organisation_id = %organisation_id, "アクティブ組織を切り替え");
        Ok(())
    }

    /// 組織を作成する
    ///
    /// 作成後はサーバーの一覧と突き合わせる。アクティブ組織は通常の解決規則に
    /// 従う（既存のアクティブがあれば変わらず、最初の組織なら新組織が
    /// アクティブになる）。
    pub async fn create(&self, name: &str) -> Result<OrganisationDto, StoreError> {
        let name = OrganisationName::new(name)?;
        let req = CreateOrganisationRequest {
            name: name.into_string(),
        };

        let created = self.client.create_organisation(&req).await?;
        self.fetch_organisations().await;

        Ok(created)
    }

    /// 全状態を破棄する（ログアウト時）
    pub fn clear(&self) {
        {
            let mut state = self.lock();
            state.organisations = Vec::new();
            state.active = None;
            state.loading = false;
        }
        self.local.remove(KEY_ACTIVE_ORGANISATION);
        self.local.remove(KEY_ORGANISATIONS);
    }

    /// 現在のアクティブ組織 ID
    pub fn active_id(&self) -> Option<OrganisationId> {
        self.lock().active.clone()
    }

    /// 所属組織の一覧
    pub fn organisations(&self) -> Vec<OrganisationDto> {
        self.lock().organisations.clone()
    }

    /// ロード中かどうか
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// リロード世代の購読チャネル
    ///
    /// 組織切り替えのたびに値が進む。コントローラはこれを購読して
    /// 表示中リソースの再取得をトリガする。
    pub fn subscribe_reload(&self) -> watch::Receiver<u64> {
        self.reload_tx.subscribe()
    }

    fn persist(&self, active: &Option<OrganisationId>) {
        match active {
            Some(id) => self.local.set(KEY_ACTIVE_ORGANISATION, id.as_str()),
            None => self.local.remove(KEY_ACTIVE_ORGANISATION),
        }

        let organisations = self.lock().organisations.clone();
        match serde_json::to_string(&organisations) {
            Ok(json) => self.local.set(KEY_ORGANISATIONS, &json),
            Err(error) => {
                tracing::warn!(error = %error, "組織リストのシリアライズに失敗");
            }
        }
    }
}
