//! Request and response types for bulk index operations.

use serde::Serialize;
use serde_json::Value;

use crate::errors::SearchIndexError;

/// One record ready to be upserted into a search index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDocument {
    /// The document id on the search cluster.
    pub id: String,
    /// The JSON source of the document.
    pub body: Value,
}

impl IndexDocument {
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    /// Serialize a typed document into an `IndexDocument`.
    pub fn from_serializable<T: Serialize>(
        id: impl Into<String>,
        doc: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(id, serde_json::to_value(doc)?))
    }
}

/// Result of a bulk operation for a single document.
#[derive(Debug, Clone)]
pub struct BulkOperationResult {
    /// The document id.
    pub id: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<SearchIndexError>,
}

/// Summary of a bulk operation containing aggregate statistics and individual results.
///
/// A summary is returned whenever the backend accepted the request, even if
/// some documents in it were rejected. This lets callers record per-document
/// failures without aborting.
#[derive(Debug, Clone, Default)]
pub struct BulkOperationSummary {
    /// Total number of documents in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each document, in request order.
    pub results: Vec<BulkOperationResult>,
}

impl BulkOperationSummary {
    /// Iterate over the failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &BulkOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}
