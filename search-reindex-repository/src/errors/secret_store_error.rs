//! Secret store error types.

use thiserror::Error;

/// Errors from resolving a secret by key.
#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// The key cannot name a secret (e.g. it contains a path separator).
    #[error("Invalid secret key: {0}")]
    InvalidKey(String),

    #[error("Failed to read secret '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

impl SecretStoreError {
    /// Create a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey(key.into())
    }
}
