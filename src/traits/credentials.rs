//! Credentials provider trait abstraction.
//!
//! The turn session asks a [`CredentialsProvider`] for a token right before
//! it would touch the network, so a sign-out between turns is observed.

use async_trait::async_trait;

use crate::auth::Credentials;

/// Credentials operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// No credential store is available (e.g. no home directory)
    Unavailable(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::Unavailable(msg) => {
                write!(f, "Credential store unavailable: {}", msg)
            }
            CredentialsError::Io(msg) => write!(f, "IO error: {}", msg),
            CredentialsError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Source of the bearer token and user id.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load credentials.
    ///
    /// - `Ok(Some(credentials))` if credentials exist
    /// - `Ok(None)` if nobody is signed in
    /// - `Err(error)` if the store could not be read
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_error_display() {
        assert_eq!(
            CredentialsError::Unavailable("no home".to_string()).to_string(),
            "Credential store unavailable: no home"
        );
        assert_eq!(
            CredentialsError::Io("disk".to_string()).to_string(),
            "IO error: disk"
        );
        assert_eq!(
            CredentialsError::Serialization("bad".to_string()).to_string(),
            "Serialization error: bad"
        );
    }
}
