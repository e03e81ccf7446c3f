use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Shown whenever a request never completed
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// API-specific errors
///
/// Status variants carry the message the backend put in the response body, if any.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Not authorized: {}", detail(.0))]
    Unauthorized(Option<String>),

    #[error("Resource not found: {}", detail(.0))]
    NotFound(Option<String>),

    #[error("Bad request: {}", detail(.0))]
    BadRequest(Option<String>),

    #[error("Conflict: {}", detail(.0))]
    Conflict(Option<String>),

    #[error("Server error: {}", detail(.0))]
    ServerError(Option<String>),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected response ({0}): {}", detail(.1))]
    Unknown(u16, Option<String>),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

fn detail(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no details")
}

/// Error bodies use `message` (most endpoints) or `error` (the login endpoints)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
            status if status.is_server_error() => ApiError::ServerError(message),
            status if status.is_client_error() => ApiError::BadRequest(message),
            status => ApiError::Unknown(status.as_u16(), message),
        }
    }

    /// Message supplied by the backend, verbatim
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(m)
            | ApiError::NotFound(m)
            | ApiError::BadRequest(m)
            | ApiError::Conflict(m)
            | ApiError::ServerError(m)
            | ApiError::Unknown(_, m) => m.as_deref(),
            ApiError::Network(_) | ApiError::MalformedResponse(_) => None,
        }
    }

    /// Text to show the user: the backend message when present, the connectivity message for
    /// transport failures, otherwise the caller's per-action fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            other => other.server_message().unwrap_or(fallback).to_string(),
        }
    }

    /// Only transport failures and 5xx answers are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::ServerError(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or(parsed.error.filter(|m| !m.trim().is_empty()))
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Treat an unreadable payload as "no data" instead of failing the view
pub trait OrEmpty<T> {
    fn or_empty(self, what: &str) -> ApiResult<T>;
}

impl<T: Default> OrEmpty<T> for ApiResult<T> {
    fn or_empty(self, what: &str) -> ApiResult<T> {
        match self {
            Err(ApiError::MalformedResponse(reason)) => {
                tracing::warn!("Ignoring malformed {} payload: {}", what, reason);
                Ok(T::default())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_is_preferred() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Bad Request","message":"Name is required"}"#,
        );
        assert_eq!(err, ApiError::BadRequest(Some("Name is required".to_string())));
    }

    #[test]
    fn test_error_field_used_by_login_endpoints() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid email or password"}"#,
        );
        assert_eq!(err.server_message(), Some("Invalid email or password"));
    }

    #[test]
    fn test_blank_or_missing_body_falls_back() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(err.user_message("Failed to save changes."), "Failed to save changes.");

        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"message":"  "}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_network_message_is_generic() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("ignored"), NETWORK_MESSAGE);
        assert!(err.is_retryable());
        assert!(!ApiError::NotFound(None).is_retryable());
    }

    #[test]
    fn test_or_empty_only_swallows_malformed() {
        let malformed: ApiResult<Vec<i64>> = Err(ApiError::MalformedResponse("eof".into()));
        assert_eq!(malformed.or_empty("programs"), Ok(vec![]));

        let missing: ApiResult<Vec<i64>> = Err(ApiError::NotFound(None));
        assert!(missing.or_empty("programs").is_err());
    }
}
