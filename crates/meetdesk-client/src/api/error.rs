//! Error types for meetings API calls.
//!
//! Failures fall in two families the page reacts to differently:
//! - **transport**: the request never produced a usable answer (network
//!   failure, unreadable or non-JSON body, unusable configuration)
//! - **application**: the server answered and reported a failure, possibly
//!   with its own message

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// The category of an API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// Connection failed, timed out, or the body could not be read.
    NetworkError,
    /// The body is not JSON or not in the expected shape.
    InvalidResponse,
    /// The request could not be built (bad base URL, missing CSRF token).
    ConfigurationError,
    /// The server refused the request (4xx other than 403/404).
    Rejected,
    /// 403, typically a missing or stale CSRF token or session.
    Forbidden,
    /// 404.
    NotFound,
    /// 5xx.
    ServerError,
}

impl ApiErrorCode {
    /// Returns true for failures where no server verdict was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::InvalidResponse | Self::ConfigurationError
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
            Self::Rejected => "rejected",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::ServerError => "server_error",
        }
    }

    /// Maps a non-success HTTP status to an application-level code.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound,
            s if s.is_server_error() => Self::ServerError,
            _ => Self::Rejected,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from a meetings API call.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    code: ApiErrorCode,
    message: String,
    /// HTTP status, when a response was received.
    status: Option<StatusCode>,
    /// The `error` text of the server's reply, if it sent one.
    server_message: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            server_message: None,
            source: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NetworkError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::InvalidResponse, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ConfigurationError, message)
    }

    /// Creates the error for a server reply reporting failure.
    pub fn from_reply(status: StatusCode, server_message: Option<String>) -> Self {
        let code = if status.is_success() {
            ApiErrorCode::Rejected
        } else {
            ApiErrorCode::from_status(status)
        };
        let message = match server_message {
            Some(ref text) => format!("{text} (HTTP {})", status.as_u16()),
            None => format!("request failed with HTTP {}", status.as_u16()),
        };
        Self {
            code,
            message,
            status: Some(status),
            server_message,
            source: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    pub fn is_transport(&self) -> bool {
        self.code.is_transport()
    }

    /// Text to show the user: the server's own message or `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message.as_deref().unwrap_or(fallback)
    }
}

/// A specialized Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_codes() {
        assert!(ApiErrorCode::NetworkError.is_transport());
        assert!(ApiErrorCode::InvalidResponse.is_transport());
        assert!(ApiErrorCode::ConfigurationError.is_transport());
        assert!(!ApiErrorCode::Rejected.is_transport());
        assert!(!ApiErrorCode::ServerError.is_transport());
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiErrorCode::from_status(StatusCode::BAD_REQUEST),
            ApiErrorCode::Rejected
        );
        assert_eq!(
            ApiErrorCode::from_status(StatusCode::FORBIDDEN),
            ApiErrorCode::Forbidden
        );
        assert_eq!(
            ApiErrorCode::from_status(StatusCode::NOT_FOUND),
            ApiErrorCode::NotFound
        );
        assert_eq!(
            ApiErrorCode::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            ApiErrorCode::ServerError
        );
    }

    #[test]
    fn reply_error_keeps_server_text() {
        let err = ApiError::from_reply(StatusCode::BAD_REQUEST, Some("Title required".into()));
        assert_eq!(err.code(), ApiErrorCode::Rejected);
        assert_eq!(err.server_message(), Some("Title required"));
        assert_eq!(err.user_message("Failed to create meeting"), "Title required");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "rejected: Title required (HTTP 400)");
    }

    #[test]
    fn reply_error_without_text_uses_fallback() {
        let err = ApiError::from_reply(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.code(), ApiErrorCode::ServerError);
        assert_eq!(err.user_message("Failed to create meeting"), "Failed to create meeting");
    }

    #[test]
    fn success_status_with_error_field_is_rejected() {
        let err = ApiError::from_reply(StatusCode::OK, Some("quota exceeded".into()));
        assert_eq!(err.code(), ApiErrorCode::Rejected);
        assert!(!err.is_transport());
    }

    #[test]
    fn source_is_exposed() {
        use std::error::Error;
        let io_err = std::io::Error::other("reset by peer");
        let err = ApiError::network("body read failed").with_source(io_err);
        assert!(err.source().is_some());
        assert!(err.is_transport());
    }
}
