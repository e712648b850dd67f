//! Secret store backed by mounted secret files.
//!
//! Each secret is a file named after its key inside a single directory
//! (e.g. `/run/secrets/search-service-db-password`).

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::errors::SecretStoreError;
use crate::interfaces::SecretStore;

/// Reads secrets from files under a directory.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve `key` to a file path inside the store directory.
    ///
    /// Keys must be a single path component.
    fn secret_path(&self, key: &str) -> Result<PathBuf, SecretStoreError> {
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0')
        {
            return Err(SecretStoreError::invalid_key(key));
        }
        Ok(self.dir.join(key))
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_global_secret_string(&self, key: &str) -> Result<String, SecretStoreError> {
        let path = self.secret_path(key)?;

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SecretStoreError::not_found(key),
                _ => SecretStoreError::Io {
                    key: key.to_string(),
                    source: e,
                },
            })?;

        debug!(key = %key, "Resolved secret from file");
        Ok(contents.trim_end_matches(['\r', '\n']).to_string())
    }
}
