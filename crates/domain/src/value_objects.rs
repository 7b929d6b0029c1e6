//! # 値オブジェクト
//!
//! 送金ワークフローで使用する検証済み値の Newtype 群。
//! いずれも `new()` でのみ構築でき、保持している値が検証済みであることを
//! 型で保証する。

use rust_decimal::Decimal;

use crate::DomainError;

// =========================================================================
// Amount（送金額）
// =========================================================================

/// 送金額（値オブジェクト）
///
/// # 不変条件
///
/// - 0 より大きい
///
/// 金額計算は行わない（このクライアントは台帳ではない）。
/// 保持と送信のみに使用する。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_more::Display,
)]
#[display("{_0}")]
pub struct Amount(Decimal);

impl Amount {
    /// 送金額を作成する
    ///
    /// # バリデーション
    ///
    /// - 0 より大きいこと
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "送金額は 0 より大きい必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の Decimal を取得する
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

// =========================================================================
// PhoneNumber（受取人電話番号）
// =========================================================================

/// 受取人電話番号（値オブジェクト）
///
/// モバイルマネー口座の識別子。
///
/// # 不変条件
///
/// - 先頭の `+` を除き数字のみ
/// - 数字部分は 8〜15 桁（E.164 の上限）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// 電話番号を作成する
    ///
    /// 空白・ハイフンは取り除いてから検証する（フォーム入力の揺れを許容）。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let raw: String = value.into();
        let cleaned: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(format!(
                "電話番号の形式が不正です: {raw}"
            )));
        }

        if digits.len() < 8 || digits.len() > 15 {
            return Err(DomainError::Validation(
                "電話番号は 8〜15 桁である必要があります".to_string(),
            ));
        }

        Ok(Self(cleaned))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// RecipientName（受取人名）
// =========================================================================

/// 受取人名（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列ではない
/// - 最大 120 文字
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct RecipientName(String);

impl RecipientName {
    /// 受取人名を作成する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("受取人名は必須です".to_string()));
        }

        if value.chars().count() > 120 {
            return Err(DomainError::Validation(
                "受取人名は 120 文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// ServiceCode（モバイルサービスコード）
// =========================================================================

/// モバイルマネーサービスコード（値オブジェクト）
///
/// 送金先のモバイルマネー事業者を識別するサーバー定義のコード
/// （例: `"om_sn"`, `"wave_sn"`）。
///
/// # 不変条件
///
/// - 空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, derive_more::Display)]
#[display("{_0}")]
pub struct ServiceCode(String);

impl ServiceCode {
    /// サービスコードを作成する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "モバイルサービスの選択は必須です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// =========================================================================
// OtpCode（ワンタイムパスワード）
// =========================================================================

/// OTP コード（値オブジェクト）
///
/// 送金コミットを承認する第 2 要素。
///
/// # 不変条件
///
/// - ちょうど 4 桁の ASCII 数字
///
/// 形式違反はネットワーク呼び出しの**前**に短絡する。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OtpCode(String);

impl OtpCode {
    /// OTP コードを作成する
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "OTP コードは 4 桁の数字である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    // Amount のテスト

    #[test]
    fn test_送金額は正の値を受け入れる() {
        let amount = Amount::new(Decimal::new(1500, 2)).unwrap();
        assert_eq!(amount.as_decimal(), Decimal::new(1500, 2));
    }

    #[test]
    fn test_送金額は0を拒否する() {
        assert!(Amount::new(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_送金額は負の値を拒否する() {
        assert!(Amount::new(Decimal::new(-1, 0)).is_err());
    }

    // PhoneNumber のテスト

    #[test]
    fn test_電話番号は国際形式を受け入れる() {
        let phone = PhoneNumber::new("+221771234567").unwrap();
        assert_eq!(phone.as_str(), "+221771234567");
    }

    #[test]
    fn test_電話番号は空白とハイフンを除去する() {
        let phone = PhoneNumber::new("77 123-45-67").unwrap();
        assert_eq!(phone.as_str(), "771234567");
    }

    #[test]
    fn test_電話番号は数字以外を拒否する() {
        assert!(PhoneNumber::new("77abc4567").is_err());
    }

    #[test]
    fn test_電話番号は短すぎる値を拒否する() {
        assert!(PhoneNumber::new("1234567").is_err());
    }

    #[test]
    fn test_電話番号は16桁以上を拒否する() {
        assert!(PhoneNumber::new("1234567890123456").is_err());
    }

    // RecipientName のテスト

    #[test]
    fn test_受取人名は空文字列を拒否する() {
        assert!(RecipientName::new("  ").is_err());
    }

    #[test]
    fn test_受取人名は前後の空白をトリミングする() {
        let name = RecipientName::new(" Awa Diop ").unwrap();
        assert_eq!(name.as_str(), "Awa Diop");
    }

    // ServiceCode のテスト

    #[test]
    fn test_サービスコードは空文字列を拒否する() {
        assert!(ServiceCode::new("").is_err());
    }

    // OtpCode のテスト

    #[test]
    fn test_otpコードは4桁の数字を受け入れる() {
        let code = OtpCode::new("0412").unwrap();
        assert_eq!(code.as_str(), "0412");
    }

    #[test]
    fn test_otpコードは桁数不足を拒否する() {
        assert!(OtpCode::new("12").is_err());
    }

    #[test]
    fn test_otpコードは桁数超過を拒否する() {
        assert!(OtpCode::new("12345").is_err());
    }

    #[test]
    fn test_otpコードは数字以外を拒否する() {
        assert!(OtpCode::new("12a4").is_err());
    }

    #[test]
    fn test_otpコードは前後の空白を許容する() {
        assert!(OtpCode::new(" 1234 ").is_ok());
    }
}
