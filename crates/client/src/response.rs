//! # レスポンスの共通ハンドリング

use pesaflow_shared::ErrorBody;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// API レスポンスの共通ハンドリング
///
/// 成功時はレスポンスボディを `T` にデシリアライズする。エラー時はボディを
/// [`ErrorBody`] として解釈し、解釈できなければステータスコードから
/// `http_<status>` 形式のコードを合成して [`ApiError::Remote`] を返す。
pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        let body = response.json::<T>().await?;
        return Ok(body);
    }

    Err(error_from_body(status, &response.text().await.unwrap_or_default()))
}

/// ボディを持たない成功レスポンス（204 など）のハンドリング
pub(crate) async fn handle_unit_response(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    Err(error_from_body(status, &response.text().await.unwrap_or_default()))
}

/// エラーレスポンスのボディから [`ApiError::Remote`] を構築する
fn error_from_body(status: reqwest::StatusCode, body: &str) -> ApiError {
    match ErrorBody::parse(body) {
        Some(parsed) => ApiError::Remote {
            code:    parsed.code,
            message: parsed.message,
            status:  status.as_u16(),
        },
        None => ApiError::Remote {
            code:    format!("http_{}", status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("不明なエラー")
                .to_string(),
            status:  status.as_u16(),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    /// テスト用のレスポンスデータ型
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestData {
        value: String,
    }

    /// テスト用の HTTP レスポンスを構築する
    fn make_response(status: u16, body: &str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    #[tokio::test]
    async fn test_成功レスポンスをデシリアライズする() {
        let response = make_response(200, r#"{"value": "hello"}"#);

        let result: Result<TestData, _> = handle_response(response).await;

        assert_eq!(
            result.unwrap(),
            TestData {
                value: "hello".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_構造化エラーボディのコードとメッセージを保持する() {
        let response = make_response(
            422,
            r#"{"error": {"code": "insufficient_balance", "message": "残高が不足しています"}}"#,
        );

        let result: Result<TestData, _> = handle_response(response).await;

        match result {
            Err(ApiError::Remote {
                code,
                message,
                status,
            }) => {
                assert_eq!(code, "insufficient_balance");
                assert_eq!(message, "残高が不足しています");
                assert_eq!(status, 422);
            }
            other => panic!("Remote を期待したが {other:?} を受け取った"),
        }
    }

    #[tokio::test]
    async fn test_非構造化ボディはステータスから合成コードを作る() {
        let response = make_response(502, "<html>Bad Gateway</html>");

        let result: Result<TestData, _> = handle_response(response).await;

        match result {
            Err(ApiError::Remote { code, status, .. }) => {
                assert_eq!(code, "http_502");
                assert_eq!(status, 502);
            }
            other => panic!("Remote を期待したが {other:?} を受け取った"),
        }
    }

    #[tokio::test]
    async fn test_成功だが不正なjsonでnetworkエラーを返す() {
        let response = make_response(200, "not json");

        let result: Result<TestData, _> = handle_response(response).await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_unitレスポンスは204を受け入れる() {
        let response = make_response(204, "");

        assert!(handle_unit_response(response).await.is_ok());
    }

    #[tokio::test]
    async fn test_unitレスポンスはエラーステータスを変換する() {
        let response = make_response(401, r#"{"error": {"code": "unauthorized", "message": "認証が必要です"}}"#);

        let result = handle_unit_response(response).await;

        assert!(matches!(
            result,
            Err(ApiError::Remote { code, .. }) if code == "unauthorized"
        ));
    }
}
