/// サーバー発番の文字列 ID をラップする Newtype を定義する宣言型マクロ
///
/// リモート API の ID はサーバーが発番する不透明な文字列であり、
/// クライアント側で生成することはない。以下のボイラープレートを一括生成する:
///
/// - Newtype 構造体（`String` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: サーバーから受け取った文字列をラップ
/// - `as_str()`: 内部文字列への参照
///
/// # 使用例
///
/// ```rust
/// use pesaflow_domain::ids::BeneficiaryId;
///
/// let id = BeneficiaryId::new("bnf_01HXY");
/// assert_eq!(id.as_str(), "bnf_01HXY");
/// ```
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(String);

        impl $Name {
            /// サーバーから受け取った ID 文字列をラップする
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// 内部の文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}
