//! Credentials storage for chatline.
//!
//! Credentials live in `~/.chatline/credentials.json`. The file is written by
//! whatever performed the sign-in; the core only reads it.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::traits::CredentialsError;

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".chatline";

/// The credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Bearer token and identity issued by the Auth Service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token sent on every request.
    #[serde(alias = "authToken", alias = "accessToken")]
    pub access_token: Option<String>,
    /// The signed-in user's id, sent in the streaming request body.
    #[serde(alias = "userId")]
    pub user_id: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            user_id: Some(user_id.into()),
        }
    }

    /// The token, if present and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.user_id.is_none()
    }
}

/// Reads and writes the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialsStore {
    credentials_path: PathBuf,
}

impl CredentialsStore {
    /// Store rooted at the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::at(home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE)))
    }

    /// Store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials. A missing file yields `Ok(None)`.
    pub fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        if !self.credentials_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.credentials_path)
            .map_err(|e| CredentialsError::Io(e.to_string()))?;
        let creds: Credentials = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;

        if creds.is_empty() {
            Ok(None)
        } else {
            Ok(Some(creds))
        }
    }

    /// Save credentials, creating the parent directory if needed.
    pub fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        if let Some(parent) = self.credentials_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CredentialsError::Io(e.to_string()))?;
        }

        let file = File::create(&self.credentials_path)
            .map_err(|e| CredentialsError::Io(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CredentialsError::Io(e.to_string()))
    }
}
