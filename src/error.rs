use std::fmt;

/// How an error should be treated by the retry policy and its callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or HTTP failure worth retrying
    Transient,
    /// Backend refused the request because of a conflicting state (HTTP 409)
    Conflict,
    /// Anything else: bad input, bad credentials, undecodable payloads
    Other,
}

/// Custom error type for Neptune operations
#[derive(Debug)]
pub enum NeptuneError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// Token not found in any source
    TokenNotFound(String),
    /// API token could not be decoded
    Credentials(String),
    /// JSON parsing error
    Json(String),
    /// Configuration error
    Config(String),
}

impl NeptuneError {
    /// Classify the error for retry and recovery decisions
    pub fn kind(&self) -> ErrorKind {
        match self {
            NeptuneError::Api { status: 409, .. } => ErrorKind::Conflict,
            // Requests that could not be built or bodies that could not be
            // decoded fail the same way on every attempt
            NeptuneError::Http(e) if e.is_builder() || e.is_decode() => ErrorKind::Other,
            NeptuneError::Api { .. } | NeptuneError::Http(_) => ErrorKind::Transient,
            NeptuneError::TokenNotFound(_)
            | NeptuneError::Credentials(_)
            | NeptuneError::Json(_)
            | NeptuneError::Config(_) => ErrorKind::Other,
        }
    }
}

impl fmt::Display for NeptuneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeptuneError::Http(e) => write!(f, "HTTP request failed: {}", e),
            NeptuneError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            NeptuneError::TokenNotFound(msg) => write!(f, "{}", msg),
            NeptuneError::Credentials(msg) => write!(f, "Invalid API token: {}", msg),
            NeptuneError::Json(msg) => write!(f, "JSON error: {}", msg),
            NeptuneError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for NeptuneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NeptuneError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NeptuneError {
    fn from(err: reqwest::Error) -> Self {
        NeptuneError::Http(err)
    }
}

impl From<serde_json::Error> for NeptuneError {
    fn from(err: serde_json::Error) -> Self {
        NeptuneError::Json(err.to_string())
    }
}

/// Result type alias for Neptune operations
pub type Result<T> = std::result::Result<T, NeptuneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = NeptuneError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NeptuneError>();
    }

    #[test]
    fn test_conflict_kind() {
        let err = NeptuneError::Api {
            status: 409,
            message: "Pending invitation".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn test_http_statuses_are_transient() {
        for status in [400, 403, 404, 429, 500, 502, 503] {
            let err = NeptuneError::Api {
                status,
                message: String::new(),
            };
            assert_eq!(err.kind(), ErrorKind::Transient, "status {}", status);
        }
    }

    #[test]
    fn test_local_errors_are_not_retried() {
        assert_eq!(
            NeptuneError::TokenNotFound("x".into()).kind(),
            ErrorKind::Other
        );
        assert_eq!(NeptuneError::Credentials("x".into()).kind(), ErrorKind::Other);
        assert_eq!(NeptuneError::Json("x".into()).kind(), ErrorKind::Other);
        assert_eq!(NeptuneError::Config("x".into()).kind(), ErrorKind::Other);
    }

    #[tokio::test]
    async fn test_request_build_failure_is_not_transient() {
        let err: NeptuneError = reqwest::Client::new()
            .get("not a url/api/backend/v1")
            .send()
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, NeptuneError::Http(_)));
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_credentials_error_display() {
        let err = NeptuneError::Credentials("not base64".to_string());
        assert!(err.to_string().contains("Invalid API token"));
        assert!(err.to_string().contains("not base64"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: NeptuneError = json_err.into();
        match err {
            NeptuneError::Json(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected NeptuneError::Json"),
        }
    }

    #[test]
    fn test_error_source_api() {
        use std::error::Error;
        let err = NeptuneError::Api {
            status: 500,
            message: "Server error".to_string(),
        };
        assert!(err.source().is_none());
    }
}
