//! # 組織
//!
//! マーチャント向けダッシュボードにおける組織（テナント）のモデル。
//!
//! ほぼすべてのリソースは「アクティブな組織」で暗黙にスコープされる。
//! アクティブ組織 ID は永続化されるが、次回ロード時にサーバーのリストと
//! 突き合わせて再検証される（盲信しない）。リストに存在しない ID は
//! ダングリング参照として扱い、リスト先頭の組織に暗黙フォールバックする。

use crate::DomainError;

define_string_id! {
    /// 組織の一意識別子
    ///
    /// サーバー発番の不透明な文字列。リソースストアのすべての
    /// スコープ付き操作に**明示的な引数として**渡される
    /// （グローバル可変状態としては共有しない）。
    pub struct OrganisationId;
}

/// 組織名（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列ではない
/// - 最大 255 文字
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct OrganisationName(String);

impl OrganisationName {
    /// 組織名を作成する
    ///
    /// # バリデーション
    ///
    /// - 前後の空白はトリミング
    /// - 空文字列ではない
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("組織名は必須です".to_string()));
        }

        if value.chars().count() > 255 {
            return Err(DomainError::Validation(
                "組織名は 255 文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}
