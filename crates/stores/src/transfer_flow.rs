//! # 送金ワークフローコントローラ
//!
//! [`TransferFlowState`] のステートマシンを駆動し、OTP 要求と
//! 送金コミットの API 呼び出しを橋渡しする。
//!
//! 状態のロックは await をまたいで保持しない。遷移→ネットワーク→遷移の
//! 各段階で個別にロックを取る。

use std::sync::{Arc, Mutex, PoisonError};

use pesaflow_client::{CommitTransferRequest, OtpClient, TransferClient, TransferDto};
use pesaflow_domain::{
    DomainError,
    organisation::OrganisationId,
    transfer::{DraftInput, TransferDraft, TransferFlowState, TransferFlowStatus},
    value_objects::OtpCode,
};

use crate::{error::StoreError, transfers::TransferStore};

/// OTP の配信チャネル
const OTP_CHANNEL: &str = "email";

/// 送金ワークフローコントローラ
pub struct TransferWorkflow {
    otp_client:      Arc<dyn OtpClient>,
    transfer_client: Arc<dyn TransferClient>,
    transfers:       Arc<TransferStore>,
    state:           Mutex<TransferFlowState>,
}

impl TransferWorkflow {
    pub fn new(
        otp_client: Arc<dyn OtpClient>,
        transfer_client: Arc<dyn TransferClient>,
        transfers: Arc<TransferStore>,
    ) -> Self {
        Self {
            otp_client,
            transfer_client,
            transfers,
            state: Mutex::new(TransferFlowState::Compose),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TransferFlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// フォーム入力を検証し、OTP を要求して確認段階へ進む
    ///
    /// 検証エラー・OTP 要求の失敗いずれの場合も入力中状態に留まる
    /// （ドラフトは作られない）。OTP 要求にはドラフトの内容を載せない。
    ///
    /// # Errors
    ///
    /// - `StoreError::Domain`: フォーム検証エラー、または入力中以外の状態
    /// - `StoreError::Api`: OTP 要求の失敗
    pub async fn submit_draft(&self, input: DraftInput) -> Result<(), StoreError> {
        let draft = input.validate()?;

        // ネットワークに出る前に状態を確認する
        {
            let state = self.lock();
            if state.status() != TransferFlowStatus::Compose {
                return Err(StoreError::Domain(DomainError::InvalidTransition(
                    format!("送金は入力中状態からのみ開始できます（現在: {}）", state.status()),
                )));
            }
        }

        self.otp_client.request_otp(OTP_CHANNEL).await?;

        self.lock().otp_requested(draft)?;
        Ok(())
    }

    /// OTP コードを検証し、送金をコミットする
    ///
    /// コードの形式検証（4 桁の数字）は状態にもネットワークにも触れる前に
    /// 行う。形式違反ではコミット試行は発生せず、状態も変わらない。
    ///
    /// コミット失敗時は OTP 入力待ちに戻り、ドラフトは保持される。
    /// 成功時は送金ストアの表示中ページを再取得する。
    pub async fn confirm_otp(
        &self,
        organisation_id: &OrganisationId,
        code: &str,
    ) -> Result<TransferDto, StoreError> {
        let code = OtpCode::new(code)?;

        let draft = self.lock().begin_commit()?;
        let req = commit_request(&draft, &code);

        match self
            .transfer_client
            .commit_transfer(organisation_id, &req)
            .await
        {
            Ok(created) => {
                self.lock().commit_succeeded()?;
                self.transfers.reload_current(organisation_id).await;
                Ok(created)
            }
            Err(error) => {
                self.lock().commit_failed()?;
                Err(StoreError::from(error))
            }
        }
    }

    /// OTP 確認画面から入力画面へ戻る
    ///
    /// ドラフトをフォーム復元用に返す。OTP チャレンジは破棄される
    /// （発行済みコードの失効はサーバーの責務）。
    pub fn back(&self) -> Result<TransferDraft, StoreError> {
        Ok(self.lock().back()?)
    }

    /// フローをキャンセルし、新しい入力画面に戻る
    ///
    /// コミット実行中はキャンセルできない。
    pub fn cancel(&self) -> Result<(), StoreError> {
        Ok(self.lock().cancel()?)
    }

    /// 保持中のドラフト（なければ None）
    pub fn draft(&self) -> Option<TransferDraft> {
        self.lock().held_draft().cloned()
    }

    /// 現在のステータス
    pub fn status(&self) -> TransferFlowStatus {
        self.lock().status()
    }
}

/// ドラフトと OTP コードからコミットリクエストを組み立てる
fn commit_request(draft: &TransferDraft, code: &OtpCode) -> CommitTransferRequest {
    CommitTransferRequest {
        amount:          draft.amount.as_decimal(),
        recipient_name:  draft.recipient.name().as_str().to_string(),
        recipient_phone: draft.recipient.phone().as_str().to_string(),
        service_code:    draft.service.as_str().to_string(),
        otp_code:        code.as_str().to_string(),
    }
}
