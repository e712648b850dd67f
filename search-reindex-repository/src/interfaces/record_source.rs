//! Record source trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::RecordSourceError;
use crate::types::IndexDocument;

/// Reads the records of one entity type out of the relational store.
///
/// Every fetch returns documents ordered by ascending id.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// The lowest and highest id in the table, or `None` when it is empty.
    async fn id_range(&self) -> Result<Option<(i64, i64)>, RecordSourceError>;

    /// Fetch every record whose id lies in `[from, to)`.
    async fn fetch_by_id(&self, from: i64, to: i64)
        -> Result<Vec<IndexDocument>, RecordSourceError>;

    /// Fetch up to `limit` records updated on or after `since` whose id is
    /// greater than `after_id`.
    async fn fetch_updated_since(
        &self,
        since: DateTime<Utc>,
        after_id: i64,
        limit: usize,
    ) -> Result<Vec<IndexDocument>, RecordSourceError>;
}
