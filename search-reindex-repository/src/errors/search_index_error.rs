//! Search index error types.
//!
//! This module defines the error type returned by bulk index operations,
//! separating transport failures (the cluster could not be reached at all)
//! from failures the cluster reported for a batch.

use thiserror::Error;

/// Errors from search index operations.
///
/// Used by the `BulkClient` trait. `ConnectionError` is a transport failure
/// and aborts a reindex run; every other variant is scoped to the batch that
/// produced it.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to reach the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The backend rejected a bulk request.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to parse response from search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search index backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Whether the error means the backend was unreachable.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport() {
        assert!(SearchIndexError::connection("refused").is_transport());
        assert!(!SearchIndexError::bulk_index("status 413").is_transport());
        assert!(!SearchIndexError::parse("bad json").is_transport());
    }

    #[test]
    fn test_display() {
        let err = SearchIndexError::bulk_index("status 429");
        assert_eq!(err.to_string(), "Bulk index error: status 429");
    }
}
