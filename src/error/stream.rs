//! Streaming-related error types.
//!
//! Two families live here. [`TransportError`] ends a turn: the request could
//! not be made, the server answered with a non-2xx status, or reading the body
//! failed. [`DecodeError`] is scoped to a single `data:` line and never ends
//! the turn.

use std::fmt;

use crate::traits::HttpError;

/// Failure of the HTTP exchange or of reading its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not connect to the server.
    ConnectionFailed { url: String, message: String },

    /// The server answered with a non-2xx status.
    HttpStatus { status: u16, message: String },

    /// Reading the next chunk of the body failed.
    ReadFailed { message: String },

    /// The transport timed out. The core never times out on its own.
    Timeout { message: String },

    /// The request was cancelled by the caller.
    Cancelled,

    /// Anything else reported by the HTTP layer.
    Other { message: String },
}

impl TransportError {
    /// Check if this error is likely transient. Retrying is the caller's job.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::ConnectionFailed { .. }
            | TransportError::ReadFailed { .. }
            | TransportError::Timeout { .. } => true,
            TransportError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            TransportError::Cancelled | TransportError::Other { .. } => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your connection.".to_string()
            }
            TransportError::HttpStatus { status, .. } => {
                format!("The server returned an error (HTTP {}).", status)
            }
            TransportError::ReadFailed { .. } => {
                "The connection was interrupted while receiving the reply.".to_string()
            }
            TransportError::Timeout { .. } => "The request timed out.".to_string(),
            TransportError::Cancelled => "The request was cancelled.".to_string(),
            TransportError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed { .. } => "E_NET_CONN",
            TransportError::HttpStatus { .. } => "E_NET_HTTP",
            TransportError::ReadFailed { .. } => "E_NET_READ",
            TransportError::Timeout { .. } => "E_NET_TIMEOUT",
            TransportError::Cancelled => "E_NET_CANCELLED",
            TransportError::Other { .. } => "E_NET_OTHER",
        }
    }

    /// Convert an error reported by the [`HttpClient`](crate::traits::HttpClient) trait.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => TransportError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(message) => TransportError::Timeout { message },
            HttpError::ServerError { status, message } => {
                TransportError::HttpStatus { status, message }
            }
            HttpError::Cancelled => TransportError::Cancelled,
            HttpError::Io(message) => TransportError::ReadFailed { message },
            HttpError::InvalidUrl(message) => TransportError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Other(message) => TransportError::Other { message },
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::ConnectionFailed { url, message } => {
                write!(f, "Connection to {} failed: {}", url, message)
            }
            TransportError::HttpStatus { status, message } => {
                write!(f, "HTTP error! status: {} ({})", status, message)
            }
            TransportError::ReadFailed { message } => {
                write!(f, "Stream read failed: {}", message)
            }
            TransportError::Timeout { message } => write!(f, "Request timeout: {}", message),
            TransportError::Cancelled => write!(f, "Request cancelled"),
            TransportError::Other { message } => write!(f, "Transport error: {}", message),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        TransportError::from_http(err, "")
    }
}

/// A `data:` payload that is not valid JSON.
///
/// Recovered locally: the line is dropped and the turn continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// The trimmed payload that failed to parse.
    pub payload: String,
    /// Parser message.
    pub message: String,
}

impl DecodeError {
    pub fn new(payload: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        "E_STREAM_JSON"
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error parsing SSE data: {}", self.message)
    }
}

impl std::error::Error for DecodeError {}
