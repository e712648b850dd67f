//! Bulk search-indexing client trait definition.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BulkOperationSummary, IndexDocument};

/// Abstracts the underlying bulk indexing transport (OpenSearch, Elasticsearch, etc.).
///
/// Implementations own retries and timeouts. Callers treat the returned
/// summary as authoritative for which documents landed.
#[async_trait]
pub trait BulkClient: Send + Sync {
    /// Upsert a batch of documents into the physical index `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - The physical (versioned) index name
    /// * `documents` - Documents to create or replace, keyed by their id
    ///
    /// # Returns
    ///
    /// * `Ok(BulkOperationSummary)` - The backend accepted the request; per-document
    ///   outcomes are in the summary
    /// * `Err(SearchIndexError)` - The request as a whole failed
    async fn bulk_upsert(
        &self,
        index: &str,
        documents: &[IndexDocument],
    ) -> Result<BulkOperationSummary, SearchIndexError>;
}
