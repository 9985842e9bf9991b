//! Environment-variable credentials provider adapter.

use async_trait::async_trait;

use crate::auth::Credentials;
use crate::traits::{CredentialsError, CredentialsProvider};

/// Token variable.
pub const TOKEN_ENV: &str = "CHATLINE_TOKEN";

/// User id variable.
pub const USER_ID_ENV: &str = "CHATLINE_USER_ID";

/// [`CredentialsProvider`] reading `CHATLINE_TOKEN` and `CHATLINE_USER_ID`.
///
/// When no token is set, loading is delegated to `fallback` if there is one.
/// A user id from the environment overrides the fallback's.
pub struct EnvCredentialsProvider {
    fallback: Option<Box<dyn CredentialsProvider>>,
}

impl EnvCredentialsProvider {
    pub fn new() -> Self {
        Self { fallback: None }
    }

    pub fn with_fallback(fallback: impl CredentialsProvider + 'static) -> Self {
        Self {
            fallback: Some(Box::new(fallback)),
        }
    }

    fn var(name: &str) -> Option<String> {
        std::env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Default for EnvCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        let user_id = Self::var(USER_ID_ENV);

        if let Some(token) = Self::var(TOKEN_ENV) {
            return Ok(Some(Credentials {
                access_token: Some(token),
                user_id,
            }));
        }

        let Some(fallback) = &self.fallback else {
            return Ok(None);
        };
        let loaded = fallback.load().await?;
        Ok(loaded.map(|mut credentials| {
            if user_id.is_some() {
                credentials.user_id = user_id;
            }
            credentials
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCredentials;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(USER_ID_ENV);
    }

    #[tokio::test]
    #[serial]
    async fn test_token_from_env() {
        clear_env();
        std::env::set_var(TOKEN_ENV, "env-token");
        std::env::set_var(USER_ID_ENV, "env-user");

        let creds = EnvCredentialsProvider::new().load().await.unwrap().unwrap();
        clear_env();

        assert_eq!(creds.token(), Some("env-token"));
        assert_eq!(creds.user_id.as_deref(), Some("env-user"));
    }

    #[tokio::test]
    #[serial]
    async fn test_unset_without_fallback_is_none() {
        clear_env();
        assert!(EnvCredentialsProvider::new().load().await.unwrap().is_none());
    }

    #[tokio::test]
    #[serial]
    async fn test_fallback_used_when_token_unset() {
        clear_env();
        std::env::set_var(USER_ID_ENV, "override");
        let provider = EnvCredentialsProvider::with_fallback(
            InMemoryCredentials::with_credentials(Credentials::new("file-token", "file-user")),
        );

        let creds = provider.load().await.unwrap().unwrap();
        clear_env();

        assert_eq!(creds.token(), Some("file-token"));
        assert_eq!(creds.user_id.as_deref(), Some("override"));
    }

    #[tokio::test]
    #[serial]
    async fn test_fallback_error_propagates() {
        clear_env();
        let fallback = InMemoryCredentials::new();
        fallback.set_load_should_fail(true);
        let provider = EnvCredentialsProvider::with_fallback(fallback);
        assert!(provider.load().await.is_err());
    }
}
