use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure modes of a single API round trip. Callers never see a raw
/// transport or JSON error; everything is mapped here at the boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("please check your password")]
    Unauthorized,
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API base url: {0}")]
    BadBaseUrl(String),
}

// Error body the service sends with non-2xx responses: {"error": {"title": "..."}}
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    title: Option<String>,
}

impl ApiError {
    /// Map a non-success status plus its body. 401 gets the credential-specific
    /// variant; everything else carries the server-provided message when the
    /// body decodes, otherwise the canonical status reason.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.title)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_maps_to_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert!(err.to_string().contains("check your password"));
    }

    #[test]
    fn server_error_carries_body_title() {
        let body = r#"{"error":{"title":"Username already taken"}}"#;
        let err = ApiError::from_status(StatusCode::CONFLICT, body);
        assert!(!err.is_unauthorized());
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Username already taken");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn malformed_error_body_falls_back_to_status_reason() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }
}
