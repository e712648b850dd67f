//! Secret store trait definition.

use async_trait::async_trait;

use crate::errors::SecretStoreError;

/// Resolves secrets shared across services by key.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Look up the string value stored under `key`.
    async fn get_global_secret_string(&self, key: &str) -> Result<String, SecretStoreError>;
}
