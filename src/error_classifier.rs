use crate::api::error::ApiError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Log level for a failed backend request in the activity log.
    pub fn classify_request_error(&self, error: &ApiError) -> LogLevel {
        // Backend overloaded or restarting
        if let Some(status) = error.status() {
            if status == 429 || (500..=599).contains(&status) {
                return LogLevel::Warn;
            }
        }
        match error {
            // Bad input or unsupported endpoint
            ApiError::Http { .. } => LogLevel::Error,
            ApiError::Application { .. } => LogLevel::Error,
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually the backend is not running
            ApiError::Reqwest(_) => LogLevel::Warn,
        }
    }

    /// Short hint shown next to a failure, if there is a useful one.
    pub fn hint(&self, error: &ApiError) -> Option<&'static str> {
        match error {
            ApiError::Reqwest(e) if e.is_connect() => Some("is the backend running?"),
            ApiError::Reqwest(e) if e.is_timeout() => Some("the backend took too long"),
            ApiError::Http { status: 404, .. } => Some("endpoint not available on this backend"),
            ApiError::Http { status: 422, .. } => Some("the backend rejected the parameters"),
            _ => None,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_request_error() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_request_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_request_error(&http(429)), LogLevel::Warn);
        assert_eq!(classifier.classify_request_error(&http(422)), LogLevel::Error);
        assert_eq!(
            classifier.classify_request_error(&ApiError::Application {
                message: "bad".into(),
                error_type: None
            }),
            LogLevel::Error
        );
    }

    #[test]
    fn test_hints() {
        let classifier = ErrorClassifier::new();
        assert!(classifier.hint(&http(404)).is_some());
        assert!(classifier.hint(&http(500)).is_none());
    }
}
