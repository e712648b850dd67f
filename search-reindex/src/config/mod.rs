//! Configuration and dependency initialization for the reindex job.

pub mod credentials;
mod dependencies;

pub use credentials::{ConnectionString, DbConfig};
pub use dependencies::Dependencies;

use std::env;
use std::path::PathBuf;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default directory of mounted secret files.
const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Settings for one reindex invocation, read once at startup.
#[derive(Debug, Clone)]
pub struct ReindexConfig {
    pub opensearch_url: String,
    pub secrets_dir: PathBuf,
    pub db: DbConfig,
}

impl ReindexConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SECRETS_DIR`: Directory the secret store reads from (default: /run/secrets)
    /// - `SEARCH_SERVICE_DB_*`: Database settings, see [`DbConfig`]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opensearch_url = lookup("OPENSEARCH_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let secrets_dir = lookup("SECRETS_DIR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_SECRETS_DIR.to_string())
            .into();

        Self {
            opensearch_url,
            secrets_dir,
            db: DbConfig::from_lookup(lookup),
        }
    }
}
