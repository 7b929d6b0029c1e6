//! # セッションストア
//!
//! 認証トークンとユーザープロフィールの薄い管理層。
//! トークンの発行・失効はすべてサーバーの責務であり、このストアは
//! 保持と受け渡しだけを行う。

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use pesaflow_client::{AuthClient, LoginRequest, TokenProvider, UserProfileDto};

use crate::{
    error::StoreError,
    local_store::{KEY_AUTH_TOKEN, LocalStore},
    organisation::OrganisationStore,
    registry::StoreRegistry,
};

/// 現在のセッショントークンを保持するセル
///
/// [`TokenProvider`] として API クライアントに渡す。セッションストアが
/// 値を差し替えると、以降のリクエストに即座に反映される。
#[derive(Debug, Default)]
pub struct TokenCell {
    token: RwLock<Option<String>>,
}

impl TokenCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// トークンを設定する
    pub fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// トークンを破棄する
    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TokenProvider for TokenCell {
    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// セッションストア
pub struct SessionStore {
    client:        Arc<dyn AuthClient>,
    local:         Arc<dyn LocalStore>,
    tokens:        Arc<TokenCell>,
    organisations: Arc<OrganisationStore>,
    registry:      Arc<StoreRegistry>,
    profile:       Mutex<Option<UserProfileDto>>,
}

impl SessionStore {
    pub fn new(
        client: Arc<dyn AuthClient>,
        local: Arc<dyn LocalStore>,
        tokens: Arc<TokenCell>,
        organisations: Arc<OrganisationStore>,
        registry: Arc<StoreRegistry>,
    ) -> Self {
        Self {
            client,
            local,
            tokens,
            organisations,
            registry,
            profile: Mutex::new(None),
        }
    }

    /// 永続化されたトークンを復元する（ネットワークなし）
    ///
    /// トークンの有効性はここでは確認しない。続けて
    /// [`SessionStore::validate`] を呼ぶこと。
    pub fn hydrate(&self) {
        if let Some(token) = self.local.get(KEY_AUTH_TOKEN) {
            self.tokens.set(&token);
        }
    }

    /// 復元したトークンの有効性をサーバーで確認する
    ///
    /// 無効（401）ならセッションを破棄して `false` を返す。
    /// ネットワークエラーの場合はトークンを保持したまま `true` を返す
    /// （オフライン起動でセッションを失わないため）。
    pub async fn validate(&self) -> bool {
        if self.tokens.bearer_token().is_none() {
            return false;
        }

        match self.client.fetch_profile().await {
            Ok(profile) => {
                *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile);
                true
            }
            Err(error) if error.is_unauthorized() => {
                tracing::info!("保存されたトークンが失効。セッションを破棄");
                self.forget_session();
                false
            }
            Err(error) => {
                tracing::warn!(error = %error, "プロフィール取得に失敗。トークンは保持");
                true
            }
        }
    }

    /// ログインする
    pub async fn login(&self, email: &str, password: &str) -> Result<(), StoreError> {
        let req = LoginRequest {
            email:    email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self.client.login(&req).await?;

        self.tokens.set(&response.token);
        self.local.set(KEY_AUTH_TOKEN, &response.token);
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = Some(response.user);

        Ok(())
    }

    /// ログアウトする
    ///
    /// サーバー側のセッション失効が失敗してもローカルの破棄は続行する
    /// （ログアウトの意思は常に尊重する）。組織コンテキストと
    /// 全スコープ付きストアも道連れに破棄する。
    pub async fn logout(&self) {
        if let Err(error) = self.client.logout().await {
            tracing::warn!(error = %error, "サーバー側のログアウトに失敗。ローカルは破棄を続行");
        }

        self.forget_session();
    }

    /// 現在のユーザープロフィール
    pub fn profile(&self) -> Option<UserProfileDto> {
        self.profile
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 認証済みかどうか
    pub fn is_authenticated(&self) -> bool {
        self.tokens.bearer_token().is_some()
    }

    /// ローカルのセッション状態をすべて破棄する
    fn forget_session(&self) {
        self.tokens.clear();
        self.local.remove(KEY_AUTH_TOKEN);
        *self.profile.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.organisations.clear();
        self.registry.reset_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cellは設定した値を返す() {
        let cell = TokenCell::new();

        cell.set("tok_123");

        assert_eq!(cell.bearer_token(), Some("tok_123".to_string()));
    }

    #[test]
    fn test_token_cellはクリア後noneを返す() {
        let cell = TokenCell::new();
        cell.set("tok_123");

        cell.clear();

        assert_eq!(cell.bearer_token(), None);
    }
}
