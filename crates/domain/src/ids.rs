//! # リソース ID
//!
//! サーバー発番の各リソース ID。Newtype により取り違えをコンパイル時に防ぐ。
//! 組織 ID は組織コンテキストの中心概念のため [`crate::organisation`] に置く。

define_string_id! {
    /// 決済 ID
    pub struct PaymentId;
}

define_string_id! {
    /// 送金 ID
    pub struct TransferId;
}

define_string_id! {
    /// 受取人 ID
    pub struct BeneficiaryId;
}

define_string_id! {
    /// API キー ID
    pub struct ApiKeyId;
}

define_string_id! {
    /// Webhook ID
    pub struct WebhookId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idはラップした文字列をそのまま返す() {
        let id = BeneficiaryId::new("bnf_42");
        assert_eq!(id.as_str(), "bnf_42");
        assert_eq!(id.to_string(), "bnf_42");
    }

    #[test]
    fn test_idはjsonで素の文字列としてシリアライズされる() {
        let id = TransferId::new("trf_7");
        let json = serde_json::to_value(&id).unwrap();

        assert_eq!(json, serde_json::json!("trf_7"));
    }

    #[test]
    fn test_idはjsonの素の文字列からデシリアライズできる() {
        let id: ApiKeyId = serde_json::from_str(r#""key_9""#).unwrap();

        assert_eq!(id, ApiKeyId::new("key_9"));
    }
}
