//! Shared HTTP response helpers.
//!
//! Both backends report failures as JSON bodies: the analytics service as
//! `{"detail": ...}`, the audit service as `{"message": ...}` or
//! `{"error": ...}`. Non-success responses become [`ClientError::Api`]
//! carrying whichever of those is present.

use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Return the response unchanged on success, or an [`ClientError::Api`] with
/// the backend's error message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        }),
    })
}

/// Check the status, then decode the JSON body.
///
/// The body is read as text first so a malformed payload surfaces as
/// [`ClientError::Parse`] rather than a transport error.
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let resp = check_response(resp).await?;
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key))
        .map(|field| match field {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail":"No file loaded"}"#).as_deref(),
            Some("No file loaded")
        );
        assert_eq!(
            error_message(r#"{"status":"error","message":"No insights selected."}"#).as_deref(),
            Some("No insights selected.")
        );
        assert_eq!(error_message("<html>"), None);
    }

    #[tokio::test]
    async fn check_response_maps_detail() {
        let err = check_response(mock_response(400, r#"{"detail":"No file loaded"}"#))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 400, ref message } if message == "No file loaded"
        ));
    }

    #[tokio::test]
    async fn check_response_falls_back_to_reason() {
        let err = check_response(mock_response(503, "")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Api { status: 503, ref message } if message == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn decode_reports_parse_errors() {
        let err = decode::<Vec<u32>>(mock_response(200, r#"{"not":"a list"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
