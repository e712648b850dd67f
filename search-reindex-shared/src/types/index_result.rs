//! Outcome of a single reindex strategy run for one entity type.

use serde::{Deserialize, Serialize};

/// Per-entity result of a reindex run.
///
/// `errors` holds one description per failed record or failed batch, in the
/// order the failures happened. A result is never merged across entity types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResult {
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl IndexResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` documents indexed without error.
    pub fn record_success(&mut self, count: usize) {
        self.successful += count;
    }

    /// Record `count` documents lost to one failure.
    pub fn record_failure(&mut self, count: usize, error: impl Into<String>) {
        self.failed += count;
        self.errors.push(error.into());
    }

    /// Total number of documents attempted.
    pub fn total(&self) -> usize {
        self.successful + self.failed
    }
}
