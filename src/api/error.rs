//! Error handling for the backend client

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// A success response whose body carries an `error` field.
    #[error("Backend error: {message}")]
    Application {
        message: String,
        error_type: Option<String>,
    },

    /// The body was not the JSON shape we expected.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http {
            status,
            message: Self::detail_message(&text),
        }
    }

    /// Extracts the `detail` of a FastAPI error body, falling back to the raw text.
    fn detail_message(text: &str) -> String {
        serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|body| match body.get("detail") {
                Some(Value::String(detail)) => Some(detail.clone()),
                Some(detail) if !detail.is_null() => Some(detail.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| text.to_string())
    }

    /// Returns the application error carried by a decoded success body, if any.
    pub fn from_application_body(body: &Value) -> Option<ApiError> {
        let error = body.as_object()?.get("error")?;
        if error.is_null() {
            return None;
        }
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let error_type = body
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(ApiError::Application {
            message,
            error_type,
        })
    }

    /// HTTP status, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_field_becomes_application_error() {
        let body = json!({"error": "matrix is singular", "type": "LinAlgError"});
        match ApiError::from_application_body(&body) {
            Some(ApiError::Application {
                message,
                error_type,
            }) => {
                assert_eq!(message, "matrix is singular");
                assert_eq!(error_type.as_deref(), Some("LinAlgError"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_regular_bodies_are_not_errors() {
        assert!(ApiError::from_application_body(&json!({"weights": [1.0]})).is_none());
        assert!(ApiError::from_application_body(&json!({"error": null})).is_none());
        assert!(ApiError::from_application_body(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_detail_message_prefers_fastapi_detail() {
        assert_eq!(
            ApiError::detail_message(r#"{"detail":"Not Found"}"#),
            "Not Found"
        );
        assert_eq!(
            ApiError::detail_message("Internal Server Error"),
            "Internal Server Error"
        );
        assert!(ApiError::detail_message(r#"{"detail":[{"loc":["body"]}]}"#).contains("loc"));
    }
}
