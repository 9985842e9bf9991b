//! Unified error type for chatline.

use thiserror::Error;

use super::auth::AuthError;
use super::stream::{DecodeError, TransportError};
use crate::traits::HttpError;

/// Every error the core can surface to a caller.
///
/// Per-line [`DecodeError`]s are recovered inside the classifier and only
/// reach this type when a caller parses a payload directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    /// Missing, unreadable, or rejected credentials.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The HTTP exchange failed or the body could not be read.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// A single payload could not be decoded.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// Another turn is still running for this conversation.
    #[error("A reply is still streaming for conversation '{key}'")]
    SessionBusy { key: String },

    /// A non-streaming response body did not match the expected shape.
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    /// Configuration or local storage problem.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ChatError {
    /// Map a transport failure, turning auth statuses into [`AuthError`]s.
    ///
    /// A 401 becomes [`AuthError::Unauthorized`] and a 403 becomes
    /// [`AuthError::AccessDenied`] for `resource`.
    pub fn from_transport(err: TransportError, resource: Option<&str>) -> Self {
        match err {
            TransportError::HttpStatus { status: 401, message } => {
                AuthError::Unauthorized { message }.into()
            }
            TransportError::HttpStatus { status: 403, .. } => AuthError::AccessDenied {
                resource: resource.map(str::to_string),
            }
            .into(),
            other => ChatError::Transport(other),
        }
    }

    /// Check if the operation may succeed when retried by the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Transport(err) => err.is_retryable(),
            ChatError::SessionBusy { .. } => true,
            ChatError::Auth(_)
            | ChatError::Decode(_)
            | ChatError::InvalidResponse { .. }
            | ChatError::Config { .. } => false,
        }
    }

    /// Check if the user has to sign in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ChatError::Auth(err) => err.requires_reauth(),
            ChatError::Transport(err) => err.status() == Some(401),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Auth(err) => err.user_message(),
            ChatError::Transport(err) => err.user_message(),
            ChatError::Decode(_) => "Received invalid data from server.".to_string(),
            ChatError::SessionBusy { .. } => {
                "Please wait for the current response to complete before sending another message."
                    .to_string()
            }
            ChatError::InvalidResponse { .. } => {
                "The server sent an unexpected response. Please try again.".to_string()
            }
            ChatError::Config { message } => format!("Configuration problem: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Auth(err) => err.error_code(),
            ChatError::Transport(err) => err.error_code(),
            ChatError::Decode(err) => err.error_code(),
            ChatError::SessionBusy { .. } => "E_SESSION_BUSY",
            ChatError::InvalidResponse { .. } => "E_INVALID_RESPONSE",
            ChatError::Config { .. } => "E_CONFIG",
        }
    }
}

impl From<HttpError> for ChatError {
    fn from(err: HttpError) -> Self {
        ChatError::from_transport(err.into(), None)
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::InvalidResponse {
            endpoint: String::new(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::Config {
            message: err.to_string(),
        }
    }
}
