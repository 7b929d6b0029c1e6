//! # API リクエスト・レスポンスの型定義

use chrono::{DateTime, NaiveDate, Utc};
use pesaflow_shared::PageRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// --- リスト取得の共通型 ---

/// リスト取得のフィルタ条件
///
/// 各フィールドはサーバーのクエリパラメータにそのまま対応する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// 取得対象期間の開始日
    pub date_from: Option<NaiveDate>,
    /// 取得対象期間の終了日
    pub date_to: Option<NaiveDate>,
    /// ステータスフィルタ（サーバー定義の値）
    pub status: Option<String>,
}

impl ListFilters {
    /// ページ指定と合わせてクエリ文字列を組み立てる
    ///
    /// 例: `?page=2&size=20&status=completed`
    pub fn to_query(&self, page: PageRequest) -> String {
        let mut query = format!("?page={}&size={}", page.page, page.size);

        if let Some(date_from) = &self.date_from {
            query.push_str(&format!("&date_from={date_from}"));
        }
        if let Some(date_to) = &self.date_to {
            query.push_str(&format!("&date_to={date_to}"));
        }
        if let Some(status) = &self.status {
            query.push_str(&format!("&status={}", urlencoding::encode(status)));
        }

        query
    }
}

// --- 決済・送金 ---

/// 決済 DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentDto {
    pub id:          String,
    pub amount:      Decimal,
    pub payer_phone: String,
    pub reference:   String,
    pub status:      String,
    pub created_at:  DateTime<Utc>,
}

/// 決済の日次集計 DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupedPaymentDto {
    /// 集計対象日
    pub date:   NaiveDate,
    pub count:  u64,
    pub total:  Decimal,
    pub status: String,
}

/// 送金 DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransferDto {
    pub id:              String,
    pub amount:          Decimal,
    pub recipient_name:  String,
    pub recipient_phone: String,
    pub service_code:    String,
    pub status:          String,
    pub created_at:      DateTime<Utc>,
}

/// 送金コミットリクエスト
///
/// ドラフトの内容と OTP コードを**このリクエストで初めて**サーバーに送信する。
/// OTP 要求時点ではドラフトは一切送信されない。
#[derive(Debug, Clone, Serialize)]
pub struct CommitTransferRequest {
    pub amount:          Decimal,
    pub recipient_name:  String,
    pub recipient_phone: String,
    pub service_code:    String,
    pub otp_code:        String,
}

// --- 受取人 ---

/// 受取人 DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeneficiaryDto {
    pub id:    String,
    pub name:  String,
    pub phone: String,
}

/// 受取人作成リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct CreateBeneficiaryRequest {
    pub name:  String,
    pub phone: String,
}

/// 受取人更新リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBeneficiaryRequest {
    pub name:  String,
    pub phone: String,
}

// --- 参照データ ---

/// 国 DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryDto {
    /// ISO 3166-1 alpha-2 コード（例: `"SN"`）
    pub code: String,
    pub name: String,
}

/// モバイルマネーサービス DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MobileServiceDto {
    /// サーバー定義のサービスコード（例: `"om_sn"`）
    pub code:         String,
    pub name:         String,
    pub country_code: String,
}

// --- API キー・Webhook ---

/// API キー DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKeyDto {
    pub id:         String,
    pub label:      String,
    /// キー本体。作成レスポンスでのみ完全な値が返り、一覧ではマスクされる
    pub key:        String,
    pub created_at: DateTime<Utc>,
}

/// API キー作成リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyRequest {
    pub label: String,
}

/// Webhook DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookDto {
    pub id:         String,
    pub api_key_id: String,
    pub url:        String,
    pub created_at: DateTime<Utc>,
}

/// Webhook 作成リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookRequest {
    pub api_key_id: String,
    pub url:        String,
}

/// Webhook 更新リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct UpdateWebhookRequest {
    pub url: String,
}

// --- 組織 ---

/// 組織 DTO
///
/// `reference` / `created_at` は古い API バージョンのレスポンスに
/// 含まれないことがあるため省略可能。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganisationDto {
    pub id:   String,
    pub name: String,
    /// サーバー発番の参照コード
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 組織作成リクエスト
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrganisationRequest {
    pub name: String,
}

// --- 認証 ---

/// ログインリクエスト
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email:    String,
    pub password: String,
}

/// ユーザープロフィール DTO
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfileDto {
    pub id:    String,
    pub email: String,
    pub name:  String,
}

/// ログインレスポンス
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user:  UserProfileDto,
}

// --- OTP ---

/// OTP 要求リクエスト
///
/// 配信チャネルのみを持つ。送金内容は**含まない**。
#[derive(Debug, Clone, Serialize)]
pub struct RequestOtpRequest {
    pub channel: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_フィルタなしはページ指定のみのクエリになる() {
        let filters = ListFilters::default();

        let query = filters.to_query(PageRequest::new(1, 10));

        assert_eq!(query, "?page=1&size=10");
    }

    #[test]
    fn test_すべてのフィルタがクエリに載る() {
        let filters = ListFilters {
            date_from: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            date_to:   Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
            status:    Some("completed".to_string()),
        };

        let query = filters.to_query(PageRequest::new(2, 20));

        assert_eq!(
            query,
            "?page=2&size=20&date_from=2026-01-01&date_to=2026-01-31&status=completed"
        );
    }

    #[test]
    fn test_ステータスはurlエンコードされる() {
        let filters = ListFilters {
            status: Some("en cours".to_string()),
            ..Default::default()
        };

        let query = filters.to_query(PageRequest::first());

        assert_eq!(query, "?page=1&size=10&status=en%20cours");
    }
}
