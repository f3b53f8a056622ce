//! Error taxonomy for analysis calls.
//!
//! Every failure of the remote call is converted into an [`ErrorDescriptor`]
//! value; nothing from the HTTP layer escapes as a panic.

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

const CONNECTION_MESSAGE: &str = "Connection Error: Unable to reach the sentiment analysis service. \
The service may be down or unreachable from your network.";
const TIMEOUT_MESSAGE: &str =
    "Timeout Error: The request to the sentiment analysis service timed out.";
const REQUEST_MESSAGE: &str = "Request Error: An error occurred while making the request.";

/// Failure categories of an analysis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Target unreachable (DNS, refused, reset during connect).
    ConnectionFailure,
    /// The 10 second request budget ran out.
    Timeout,
    /// Non-2xx status or any other transport problem.
    RequestFailure,
    /// Anything uncategorized, such as an undecodable body.
    UnexpectedFailure,
    /// The upstream answered 2xx but reported an error in its payload.
    UpstreamError,
}

impl ErrorKind {
    /// Network-level kinds, the ones fallback mode is allowed to swallow.
    pub fn is_network(self) -> bool {
        !matches!(self, ErrorKind::UpstreamError)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ConnectionFailure => "connection-failure",
            ErrorKind::Timeout => "timeout",
            ErrorKind::RequestFailure => "request-failure",
            ErrorKind::UnexpectedFailure => "unexpected-failure",
            ErrorKind::UpstreamError => "upstream-error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed analysis. Serializes as `{"error": <message>, "details": <string>}`.
#[derive(Debug, Clone, PartialEq, Error, Serialize, ToSchema)]
#[error("{message}")]
pub struct ErrorDescriptor {
    #[serde(skip)]
    pub kind: ErrorKind,
    #[serde(rename = "error")]
    #[schema(example = "Timeout Error: The request to the sentiment analysis service timed out.")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorDescriptor {
    pub fn connection(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConnectionFailure, CONNECTION_MESSAGE, details)
    }

    pub fn timeout(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, TIMEOUT_MESSAGE, details)
    }

    pub fn request(details: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestFailure, REQUEST_MESSAGE, details)
    }

    /// `type_name` is the name of the failing error type, used as the message.
    pub fn unexpected(type_name: &str, details: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UnexpectedFailure,
            format!("Unexpected Error: {}", type_name),
            details,
        )
    }

    pub fn upstream(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamError, message, details)
    }

    fn new(kind: ErrorKind, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

impl From<reqwest::Error> for ErrorDescriptor {
    fn from(e: reqwest::Error) -> Self {
        // A connect timeout reports both flags; the timeout wins.
        if e.is_timeout() {
            ErrorDescriptor::timeout(e.to_string())
        } else if e.is_connect() {
            ErrorDescriptor::connection(e.to_string())
        } else {
            ErrorDescriptor::request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ErrorDescriptor {
    fn from(e: serde_json::Error) -> Self {
        ErrorDescriptor::unexpected(std::any::type_name::<serde_json::Error>(), e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shape() {
        let err = ErrorDescriptor::timeout("operation timed out");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Timeout Error: The request to the sentiment analysis service timed out.",
                "details": "operation timed out"
            })
        );
    }

    #[test]
    fn test_unexpected_uses_type_name() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ErrorDescriptor::from(parse_err);
        assert_eq!(err.kind, ErrorKind::UnexpectedFailure);
        assert!(err.message.starts_with("Unexpected Error: serde_json::"));
        assert!(err.details.is_some());
    }

    #[test]
    fn test_network_kinds() {
        assert!(ErrorKind::ConnectionFailure.is_network());
        assert!(ErrorKind::Timeout.is_network());
        assert!(ErrorKind::RequestFailure.is_network());
        assert!(ErrorKind::UnexpectedFailure.is_network());
        assert!(!ErrorKind::UpstreamError.is_network());
        assert_eq!(ErrorKind::RequestFailure.to_string(), "request-failure");
    }
}
