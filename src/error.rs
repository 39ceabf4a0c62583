//! Error types for the HTTP transport

use std::fmt;

use thiserror::Error;

/// Broad classification of a transport-level failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The connection could not be established (refused, DNS failure, TLS handshake)
    Connect,
    /// The exchange did not complete within the configured timeout
    Timeout,
    /// The server answered with a non-success HTTP status
    Status,
    /// The server answered with a body that is not JSON
    Decode,
    /// Any other failure while building or running the request
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Status => "status",
            TransportErrorKind::Decode => "decode",
            TransportErrorKind::Request => "request",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while configuring or using a transport
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// The transport configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The caller handed `send` an unusable payload
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The payload handed to `send` is not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The HTTP exchange failed
    #[error("Transport error ({kind}): {message}")]
    TransportError {
        /// Failure classification
        kind: TransportErrorKind,
        /// HTTP status code, when the server answered
        status: Option<u16>,
        /// Underlying message
        message: String,
    },
}

/// Result type using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a transport error
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Error::TransportError {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Create a transport error for a non-success HTTP status
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Error::TransportError {
            kind: TransportErrorKind::Status,
            status: Some(status),
            message: message.into(),
        }
    }

    /// Transport failure classification, if this is a transport error
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            Error::TransportError { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::TransportError { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the failure looks like a transient network fault.
    ///
    /// Connect and timeout failures, `429 Too Many Requests` and `5xx`
    /// statuses are considered retryable. Whether to actually retry is up
    /// to the client owning the transport.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::TransportError { kind, status, .. } => match kind {
                TransportErrorKind::Connect | TransportErrorKind::Timeout => true,
                TransportErrorKind::Status => {
                    matches!(status, Some(code) if *code == 429 || (500..600).contains(code))
                }
                TransportErrorKind::Decode | TransportErrorKind::Request => false,
            },
            _ => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::ConfigError(format!("invalid url: {}", err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_status() {
            TransportErrorKind::Status
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else {
            TransportErrorKind::Request
        };

        Error::TransportError {
            kind,
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(Error::transport(TransportErrorKind::Connect, "refused").is_retryable());
        assert!(Error::transport(TransportErrorKind::Timeout, "slow").is_retryable());
        assert!(Error::status(503, "unavailable").is_retryable());
        assert!(Error::status(429, "slow down").is_retryable());

        assert!(!Error::status(404, "not found").is_retryable());
        assert!(!Error::transport(TransportErrorKind::Decode, "garbage").is_retryable());
        assert!(!Error::ParseError("bad".to_string()).is_retryable());
        assert!(!Error::ConfigError("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_status_accessors() {
        let err = Error::status(502, "bad gateway");
        assert_eq!(err.status_code(), Some(502));
        assert_eq!(err.transport_kind(), Some(TransportErrorKind::Status));
        assert_eq!(err.to_string(), "Transport error (status): bad gateway");

        let err = Error::ValidationError("empty".to_string());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.transport_kind(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
