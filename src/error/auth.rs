//! Authentication-related error types.
//!
//! The core never logs a user in. It only consumes a bearer token handed to
//! it by the caller, so the variants here describe a token that is absent,
//! unreadable, or rejected by the server.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token is available. Raised before any network call.
    MissingToken,

    /// No user id is available for the streaming request body.
    MissingUserId,

    /// The server rejected the token (HTTP 401).
    Unauthorized { message: String },

    /// The server refused access to a resource (HTTP 403).
    AccessDenied { resource: Option<String> },

    /// Credentials could not be loaded from their store.
    CredentialsLoadFailed { message: String },
}

impl AuthError {
    /// Check if this error might be resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::MissingUserId | AuthError::Unauthorized { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::MissingToken => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::MissingUserId => {
                "Your session is incomplete. Please sign in again.".to_string()
            }
            AuthError::Unauthorized { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::AccessDenied { resource } => match resource {
                Some(r) => format!("Access denied to {}.", r),
                None => "Access denied. You don't have permission for this action.".to_string(),
            },
            AuthError::CredentialsLoadFailed { .. } => {
                "Could not load your credentials. Please sign in again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "E_AUTH_NO_TOKEN",
            AuthError::MissingUserId => "E_AUTH_NO_USER",
            AuthError::Unauthorized { .. } => "E_AUTH_UNAUTHORIZED",
            AuthError::AccessDenied { .. } => "E_AUTH_ACCESS",
            AuthError::CredentialsLoadFailed { .. } => "E_AUTH_CRED_LOAD",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "No authentication token found"),
            AuthError::MissingUserId => write!(f, "No user id found in credentials"),
            AuthError::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            AuthError::AccessDenied { resource } => match resource {
                Some(r) => write!(f, "Access denied to '{}'", r),
                None => write!(f, "Access denied"),
            },
            AuthError::CredentialsLoadFailed { message } => {
                write!(f, "Failed to load credentials: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
