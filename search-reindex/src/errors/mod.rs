//! Error types for the search reindex job.

use search_reindex_repository::{RecordSourceError, SearchIndexError, SecretStoreError};
use thiserror::Error;

/// Errors that end a reindex run.
///
/// Per-record indexing failures are not errors; they are collected in the
/// `IndexResult` of the entity type they belong to.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// A required setting is missing.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The secret store could not resolve a secret.
    #[error("Secret error: {0}")]
    SecretError(#[from] SecretStoreError),

    /// Connecting to or pinging the database failed.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// A command-line value is malformed.
    #[error("{param}: {message}")]
    InvalidInput { param: String, message: String },

    /// Fetching records failed.
    #[error("Record source error: {0}")]
    RecordSourceError(#[from] RecordSourceError),

    /// The search cluster could not be used.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    /// The run was stopped by a shutdown signal.
    #[error("Reindex cancelled")]
    Cancelled,
}

impl ReindexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create an input validation error for the flag `param`.
    pub fn invalid_input(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            param: param.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_parameter() {
        let err = ReindexError::invalid_input("-from-date", "premature end of input");
        assert_eq!(err.to_string(), "-from-date: premature end of input");
    }

    #[test]
    fn test_config_message() {
        let err = ReindexError::config("SEARCH_SERVICE_DB_USER must be specified");
        assert_eq!(
            err.to_string(),
            "Configuration error: SEARCH_SERVICE_DB_USER must be specified"
        );
    }
}
