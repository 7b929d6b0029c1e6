//! # 送金ワークフロー
//!
//! OTP で保護された 2 段階の送金作成フローを管理する。
//!
//! ## 概念モデル
//!
//! - **TransferDraft**: 検証済みだが未確定の送金意図。メモリ上にのみ存在する
//! - **TransferFlowState**: compose → OTP 検証 → コミットの ADT ステートマシン
//!
//! ## 2 段階分離の理由
//!
//! ドラフト（受取人・金額・サービス）は**コミットエンドポイントにのみ**送信され、
//! OTP リクエストには一切載せない。検証コードの要求がそれ自体で送金になったり、
//! バックエンドに送金試行と誤認されたりしないための分離であり、OTP 入力段階で
//! 離脱しても金銭的副作用はゼロになる。
//!
//! 状態遷移は ADT で表現し、不正な状態を型レベルで防止する。

use strum::IntoStaticStr;

use crate::{
    DomainError,
    ids::BeneficiaryId,
    value_objects::{Amount, PhoneNumber, RecipientName, ServiceCode},
};

// =========================================================================
// 受取人
// =========================================================================

/// 送金の受取人
///
/// 登録済み受取人からの選択と手入力は相互排他（XOR）。
/// どちらの場合も検証済みの名前と電話番号を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// 登録済み受取人から選択
    Beneficiary {
        id:    BeneficiaryId,
        name:  RecipientName,
        phone: PhoneNumber,
    },
    /// 手入力の受取人
    Manual {
        name:  RecipientName,
        phone: PhoneNumber,
    },
}

impl Recipient {
    /// 受取人名を取得する
    pub fn name(&self) -> &RecipientName {
        match self {
            Self::Beneficiary { name, .. } | Self::Manual { name, .. } => name,
        }
    }

    /// 受取人電話番号を取得する
    pub fn phone(&self) -> &PhoneNumber {
        match self {
            Self::Beneficiary { phone, .. } | Self::Manual { phone, .. } => phone,
        }
    }
}

// =========================================================================
// ドラフト
// =========================================================================

/// 検証済み送金ドラフト
///
/// compose 送信からコミット成功・明示キャンセルまでの間だけ存在する。
/// 永続化は一切しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDraft {
    pub amount:    Amount,
    pub recipient: Recipient,
    pub service:   ServiceCode,
}

/// 登録済み受取人への参照（フォーム検証の入力）
///
/// ストア層が受取人ストアから解決して渡す。名前と電話番号は未検証の
/// サーバー由来文字列のまま受け取り、検証はドラフト検証で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeneficiaryRef {
    pub id:    BeneficiaryId,
    pub name:  String,
    pub phone: String,
}

/// 送金フォームの生入力
///
/// [`DraftInput::validate`] で [`TransferDraft`] に変換する。
#[derive(Debug, Clone, Default)]
pub struct DraftInput {
    /// 送金額（フォームの生文字列をパース済みの値）
    pub amount: Option<rust_decimal::Decimal>,
    /// 登録済み受取人（選択されていれば）
    pub beneficiary: Option<BeneficiaryRef>,
    /// 手入力の受取人名
    pub manual_name: Option<String>,
    /// 手入力の受取人電話番号
    pub manual_phone: Option<String>,
    /// モバイルサービスコード
    pub service_code: String,
}

impl DraftInput {
    /// フォーム入力を検証してドラフトに変換する
    ///
    /// # バリデーション
    ///
    /// - 送金額は必須かつ 0 より大きい
    /// - 受取人は「登録済みから選択」か「名前+電話番号の手入力」の
    ///   **どちらか一方のみ**（相互排他）
    /// - サービスコードは必須
    ///
    /// # Errors
    ///
    /// - `DomainError::Validation`: いずれかの規則に違反した場合
    pub fn validate(self) -> Result<TransferDraft, DomainError> {
        let amount = self.amount.ok_or_else(|| {
            DomainError::Validation("送金額は必須です".to_string())
        })?;
        let amount = Amount::new(amount)?;

        let manual_entered = self.manual_name.is_some() || self.manual_phone.is_some();
        let recipient = match (self.beneficiary, manual_entered) {
            (Some(_), true) => {
                return Err(DomainError::Validation(
                    "受取人は登録済みからの選択と手入力のどちらか一方だけ指定できます"
                        .to_string(),
                ));
            }
            (Some(beneficiary), false) => Recipient::Beneficiary {
                id:    beneficiary.id,
                name:  RecipientName::new(beneficiary.name)?,
                phone: PhoneNumber::new(beneficiary.phone)?,
            },
            (None, true) => {
                let name = self.manual_name.ok_or_else(|| {
                    DomainError::Validation("受取人名は必須です".to_string())
                })?;
                let phone = self.manual_phone.ok_or_else(|| {
                    DomainError::Validation("受取人電話番号は必須です".to_string())
                })?;
                Recipient::Manual {
                    name:  RecipientName::new(name)?,
                    phone: PhoneNumber::new(phone)?,
                }
            }
            (None, false) => {
                return Err(DomainError::Validation(
                    "受取人を指定してください".to_string(),
                ));
            }
        };

        Ok(TransferDraft {
            amount,
            recipient,
            service: ServiceCode::new(self.service_code)?,
        })
    }
}

// =========================================================================
// ステートマシン
// =========================================================================

/// 送金ワークフローのステータス（UI 表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransferFlowStatus {
    /// 入力中
    Compose,
    /// OTP 入力待ち
    AwaitingOtp,
    /// コミット実行中
    Committing,
    /// 完了
    Done,
}

/// 送金ワークフローの状態（ADT ベースステートマシン）
///
/// ```text
/// Compose ──submit──▶ AwaitingOtp ──confirm──▶ Committing ──成功──▶ Done
///    ▲                   │  ▲                      │
///    │◀───back/cancel────┘  └──────コミット失敗─────┘
/// ```
///
/// - ドラフトを保持するのは `AwaitingOtp` と `Committing` のみ。
///   コミット成功・キャンセルで破棄される
/// - コミット失敗は `AwaitingOtp` に戻る（`Compose` ではない）。
///   OTP の打ち間違いが支配的な失敗モードであり、ドラフトの再入力なしに
///   安価に再試行できる必要がある
/// - `Committing` 中は確定・キャンセルとも拒否し、二重送信を防ぐ
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferFlowState {
    /// 入力中
    Compose,
    /// OTP 入力待ち（検証済みドラフトを保持）
    AwaitingOtp(TransferDraft),
    /// コミット実行中（検証済みドラフトを保持）
    Committing(TransferDraft),
    /// 完了
    Done,
}

impl TransferFlowState {
    /// UI 表示用のステータスを返す
    pub fn status(&self) -> TransferFlowStatus {
        match self {
            Self::Compose => TransferFlowStatus::Compose,
            Self::AwaitingOtp(_) => TransferFlowStatus::AwaitingOtp,
            Self::Committing(_) => TransferFlowStatus::Committing,
            Self::Done => TransferFlowStatus::Done,
        }
    }

    /// 保持中のドラフトへの参照（なければ None）
    pub fn held_draft(&self) -> Option<&TransferDraft> {
        match self {
            Self::AwaitingOtp(draft) | Self::Committing(draft) => Some(draft),
            Self::Compose | Self::Done => None,
        }
    }

    /// OTP 要求成功: `Compose` → `AwaitingOtp`
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: `Compose` 以外の状態で呼び出した場合
    pub fn otp_requested(&mut self, draft: TransferDraft) -> Result<(), DomainError> {
        match self {
            Self::Compose => {
                *self = Self::AwaitingOtp(draft);
                Ok(())
            }
            _ => Err(DomainError::InvalidTransition(format!(
                "OTP の要求は入力中状態でのみ可能です（現在: {}）",
                self.status()
            ))),
        }
    }

    /// コミット開始: `AwaitingOtp` → `Committing`
    ///
    /// コミット呼び出しに使うドラフトのクローンを返す。
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: `AwaitingOtp` 以外の状態で呼び出した場合
    ///   （`Committing` 中の再入も含む = 二重送信防止）
    pub fn begin_commit(&mut self) -> Result<TransferDraft, DomainError> {
        match std::mem::replace(self, Self::Compose) {
            Self::AwaitingOtp(draft) => {
                *self = Self::Committing(draft.clone());
                Ok(draft)
            }
            other => {
                let message = format!(
                    "コミットは OTP 入力待ち状態でのみ可能です（現在: {}）",
                    other.status()
                );
                *self = other;
                Err(DomainError::InvalidTransition(message))
            }
        }
    }

    /// コミット成功: `Committing` → `Done`（ドラフト破棄）
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: `Committing` 以外の状態で呼び出した場合
    pub fn commit_succeeded(&mut self) -> Result<(), DomainError> {
        match self {
            Self::Committing(_) => {
                *self = Self::Done;
                Ok(())
            }
            _ => Err(DomainError::InvalidTransition(format!(
                "コミット完了はコミット実行中状態でのみ可能です（現在: {}）",
                self.status()
            ))),
        }
    }

    /// コミット失敗: `Committing` → `AwaitingOtp`（ドラフト保持）
    ///
    /// OTP の再入力だけで再試行できるよう、`Compose` には戻さない。
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: `Committing` 以外の状態で呼び出した場合
    pub fn commit_failed(&mut self) -> Result<(), DomainError> {
        match std::mem::replace(self, Self::Compose) {
            Self::Committing(draft) => {
                *self = Self::AwaitingOtp(draft);
                Ok(())
            }
            other => {
                let message = format!(
                    "コミット失敗の記録はコミット実行中状態でのみ可能です（現在: {}）",
                    other.status()
                );
                *self = other;
                Err(DomainError::InvalidTransition(message))
            }
        }
    }

    /// 戻る: `AwaitingOtp` → `Compose`
    ///
    /// OTP チャレンジ状態は破棄するが、ドラフトはフォーム復元用に返す。
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: `AwaitingOtp` 以外の状態で呼び出した場合
    pub fn back(&mut self) -> Result<TransferDraft, DomainError> {
        match std::mem::replace(self, Self::Compose) {
            Self::AwaitingOtp(draft) => Ok(draft),
            other => {
                let message = format!(
                    "戻る操作は OTP 入力待ち状態でのみ可能です（現在: {}）",
                    other.status()
                );
                *self = other;
                Err(DomainError::InvalidTransition(message))
            }
        }
    }

    /// キャンセル: ドラフトを破棄して新しい `Compose` に戻る
    ///
    /// `Compose`・`AwaitingOtp`・`Done` から遷移可能。
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: `Committing` 中（コミットの結果が
    ///   確定するまでドラフトは破棄できない）
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        match self {
            Self::Committing(_) => Err(DomainError::InvalidTransition(
                "コミット実行中はキャンセルできません".to_string(),
            )),
            _ => {
                *self = Self::Compose;
                Ok(())
            }
        }
    }
}

impl Default for TransferFlowState {
    fn default() -> Self {
        Self::Compose
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    use super::*;

    #[fixture]
    fn valid_input() -> DraftInput {
        DraftInput {
            amount: Some(Decimal::new(5000, 0)),
            beneficiary: None,
            manual_name: Some("Awa Diop".to_string()),
            manual_phone: Some("+221771234567".to_string()),
            service_code: "om_sn".to_string(),
        }
    }

    #[fixture]
    fn draft(valid_input: DraftInput) -> TransferDraft {
        valid_input.validate().unwrap()
    }

    mod draft_input {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_手入力の受取人で検証が通る(valid_input: DraftInput) {
            let draft = valid_input.validate().unwrap();

            assert_eq!(draft.recipient.name().as_str(), "Awa Diop");
            assert_eq!(draft.recipient.phone().as_str(), "+221771234567");
            assert_eq!(draft.service.as_str(), "om_sn");
        }

        #[rstest]
        fn test_登録済み受取人で検証が通る(mut valid_input: DraftInput) {
            valid_input.manual_name = None;
            valid_input.manual_phone = None;
            valid_input.beneficiary = Some(BeneficiaryRef {
                id:    BeneficiaryId::new("bnf_1"),
                name:  "Moussa Ba".to_string(),
                phone: "771112233".to_string(),
            });

            let draft = valid_input.validate().unwrap();

            assert!(matches!(draft.recipient, Recipient::Beneficiary { .. }));
            assert_eq!(draft.recipient.name().as_str(), "Moussa Ba");
        }

        #[rstest]
        fn test_受取人の選択と手入力の併用は拒否する(mut valid_input: DraftInput) {
            valid_input.beneficiary = Some(BeneficiaryRef {
                id:    BeneficiaryId::new("bnf_1"),
                name:  "Moussa Ba".to_string(),
                phone: "771112233".to_string(),
            });

            let result = valid_input.validate();

            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        #[rstest]
        fn test_受取人未指定は拒否する(mut valid_input: DraftInput) {
            valid_input.manual_name = None;
            valid_input.manual_phone = None;

            assert!(valid_input.validate().is_err());
        }

        #[rstest]
        fn test_送金額未入力は拒否する(mut valid_input: DraftInput) {
            valid_input.amount = None;

            assert!(valid_input.validate().is_err());
        }

        #[rstest]
        fn test_送金額0は拒否する(mut valid_input: DraftInput) {
            valid_input.amount = Some(Decimal::ZERO);

            assert!(valid_input.validate().is_err());
        }

        #[rstest]
        fn test_サービスコード未指定は拒否する(mut valid_input: DraftInput) {
            valid_input.service_code = String::new();

            assert!(valid_input.validate().is_err());
        }

        #[rstest]
        fn test_手入力で電話番号だけ欠けていると拒否する(mut valid_input: DraftInput) {
            valid_input.manual_phone = None;

            assert!(valid_input.validate().is_err());
        }
    }

    mod transfer_flow_state {
        use pretty_assertions::assert_eq;

        use super::*;

        #[rstest]
        fn test_otp要求成功でawaiting_otpに遷移しドラフトを保持する(draft: TransferDraft) {
            let mut state = TransferFlowState::Compose;

            state.otp_requested(draft.clone()).unwrap();

            assert_eq!(state, TransferFlowState::AwaitingOtp(draft));
        }

        #[rstest]
        fn test_compose以外からのotp要求はエラー(draft: TransferDraft) {
            let mut state = TransferFlowState::AwaitingOtp(draft.clone());

            let result = state.otp_requested(draft.clone());

            assert!(result.is_err());
            // 状態は変化しない
            assert_eq!(state, TransferFlowState::AwaitingOtp(draft));
        }

        #[rstest]
        fn test_コミット開始でドラフトのクローンを返しcommittingに遷移する(
            draft: TransferDraft,
        ) {
            let mut state = TransferFlowState::AwaitingOtp(draft.clone());

            let returned = state.begin_commit().unwrap();

            assert_eq!(returned, draft);
            assert_eq!(state, TransferFlowState::Committing(draft));
        }

        #[rstest]
        fn test_committing中の再コミットはエラーで状態は保持される(draft: TransferDraft) {
            let mut state = TransferFlowState::Committing(draft.clone());

            let result = state.begin_commit();

            assert!(result.is_err());
            assert_eq!(state, TransferFlowState::Committing(draft));
        }

        #[rstest]
        fn test_コミット成功でdoneに遷移しドラフトが破棄される(draft: TransferDraft) {
            let mut state = TransferFlowState::Committing(draft);

            state.commit_succeeded().unwrap();

            assert_eq!(state, TransferFlowState::Done);
            assert!(state.held_draft().is_none());
        }

        #[rstest]
        fn test_コミット失敗でawaiting_otpに戻りドラフトが残る(draft: TransferDraft) {
            let mut state = TransferFlowState::Committing(draft.clone());

            state.commit_failed().unwrap();

            assert_eq!(state, TransferFlowState::AwaitingOtp(draft.clone()));
            assert_eq!(state.held_draft(), Some(&draft));
        }

        #[rstest]
        fn test_backはドラフトを返してcomposeに戻る(draft: TransferDraft) {
            let mut state = TransferFlowState::AwaitingOtp(draft.clone());

            let returned = state.back().unwrap();

            assert_eq!(returned, draft);
            assert_eq!(state, TransferFlowState::Compose);
        }

        #[rstest]
        fn test_composeからのbackはエラー() {
            let mut state = TransferFlowState::Compose;

            assert!(state.back().is_err());
        }

        #[rstest]
        fn test_キャンセルでドラフトが破棄される(draft: TransferDraft) {
            let mut state = TransferFlowState::AwaitingOtp(draft);

            state.cancel().unwrap();

            assert_eq!(state, TransferFlowState::Compose);
        }

        #[rstest]
        fn test_done状態のキャンセルで新しいcomposeに戻る(draft: TransferDraft) {
            let mut state = TransferFlowState::Committing(draft);
            state.commit_succeeded().unwrap();

            state.cancel().unwrap();

            assert_eq!(state, TransferFlowState::Compose);
        }

        #[rstest]
        fn test_committing中のキャンセルはエラー(draft: TransferDraft) {
            let mut state = TransferFlowState::Committing(draft.clone());

            let result = state.cancel();

            assert!(result.is_err());
            assert_eq!(state, TransferFlowState::Committing(draft));
        }

        #[rstest]
        fn test_statusが各状態を正しく報告する(draft: TransferDraft) {
            assert_eq!(
                TransferFlowState::Compose.status(),
                TransferFlowStatus::Compose
            );
            assert_eq!(
                TransferFlowState::AwaitingOtp(draft.clone()).status(),
                TransferFlowStatus::AwaitingOtp
            );
            assert_eq!(
                TransferFlowState::Committing(draft).status(),
                TransferFlowStatus::Committing
            );
            assert_eq!(TransferFlowState::Done.status(), TransferFlowStatus::Done);
        }
    }
}
