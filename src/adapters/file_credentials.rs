//! File-based credentials provider adapter.

use async_trait::async_trait;

use crate::auth::{Credentials, CredentialsStore};
use crate::traits::{CredentialsError, CredentialsProvider};

/// [`CredentialsProvider`] reading `~/.chatline/credentials.json`.
///
/// The file is re-read on every [`load`](CredentialsProvider::load), so a
/// sign-out performed by another process is seen by the next turn.
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    store: CredentialsStore,
}

impl FileCredentialsProvider {
    /// Provider for the default location in the home directory.
    pub fn new() -> Result<Self, CredentialsError> {
        CredentialsStore::new()
            .map(|store| Self { store })
            .ok_or_else(|| {
                CredentialsError::Unavailable("Failed to determine home directory".to_string())
            })
    }

    pub fn with_store(store: CredentialsStore) -> Self {
        Self { store }
    }

    pub fn credentials_path(&self) -> &std::path::Path {
        self.store.credentials_path()
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.load())
            .await
            .map_err(|e| CredentialsError::Io(e.to_string()))?
    }
}
