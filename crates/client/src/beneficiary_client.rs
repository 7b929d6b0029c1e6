//! # 受取人関連の API クライアント

use async_trait::async_trait;
use pesaflow_domain::{ids::BeneficiaryId, organisation::OrganisationId};
use pesaflow_shared::PageRequest;

use crate::{
    client_impl::ApiClientImpl,
    error::ApiError,
    response::{handle_response, handle_unit_response},
    types::{BeneficiaryDto, CreateBeneficiaryRequest, UpdateBeneficiaryRequest},
};

/// 受取人関連の API クライアントトレイト
#[async_trait]
pub trait BeneficiaryClient: Send + Sync {
    /// 組織内の受取人一覧を取得する
    ///
    /// `GET /beneficiaries` を呼び出す。レスポンスの JSON は正規化せずに返す。
    async fn list_beneficiaries(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError>;

    /// 受取人を登録する
    ///
    /// `POST /beneficiaries` を呼び出す。
    async fn create_beneficiary(
        &self,
        organisation_id: &OrganisationId,
        req: &CreateBeneficiaryRequest,
    ) -> Result<BeneficiaryDto, ApiError>;

    /// 受取人を更新する
    ///
    /// `PATCH /beneficiaries/{id}` を呼び出す。
    async fn update_beneficiary(
        &self,
        organisation_id: &OrganisationId,
        beneficiary_id: &BeneficiaryId,
        req: &UpdateBeneficiaryRequest,
    ) -> Result<BeneficiaryDto, ApiError>;

    /// 受取人を削除する
    ///
    /// `DELETE /beneficiaries/{id}` を呼び出す。
    async fn delete_beneficiary(
        &self,
        organisation_id: &OrganisationId,
        beneficiary_id: &BeneficiaryId,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl BeneficiaryClient for ApiClientImpl {
    async fn list_beneficiaries(
        &self,
        organisation_id: &OrganisationId,
        page: PageRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let path = format!(
            "/beneficiaries?page={}&size={}&organisation_id={}",
            page.page, page.size, organisation_id
        );

        let response = self.get(&path).send().await?;
        handle_response(response).await
    }

    async fn create_beneficiary(
        &self,
        organisation_id: &OrganisationId,
        req: &CreateBeneficiaryRequest,
    ) -> Result<BeneficiaryDto, ApiError> {
        let path = format!("/beneficiaries?organisation_id={organisation_id}");

        let response = self.post(&path).json(req).send().await?;
        handle_response(response).await
    }

    async fn update_beneficiary(
        &self,
        organisation_id: &OrganisationId,
        beneficiary_id: &BeneficiaryId,
        req: &UpdateBeneficiaryRequest,
    ) -> Result<BeneficiaryDto, ApiError> {
        let path = format!(
            "/beneficiaries/{beneficiary_id}?organisation_id={organisation_id}"
        );

        let response = self.patch(&path).json(req).send().await?;
        handle_response(response).await
    }

    async fn delete_beneficiary(
        &self,
        organisation_id: &OrganisationId,
        beneficiary_id: &BeneficiaryId,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/beneficiaries/{beneficiary_id}?organisation_id={organisation_id}"
        );

        let response = self.delete(&path).send().await?;
        handle_unit_response(response).await
    }
}
