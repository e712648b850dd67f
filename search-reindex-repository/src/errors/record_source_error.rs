//! Record source error types.

use thiserror::Error;

/// Errors from fetching records out of the relational store.
#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A fetched row could not be turned into a search document.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RecordSourceError {
    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<serde_json::Error> for RecordSourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
