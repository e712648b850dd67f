//! Per-entity indexers.
//!
//! An indexer reads records of one entity type from a [`RecordSource`] in
//! batches and upserts them into one physical index through a [`BulkClient`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use search_reindex_repository::{BulkClient, IndexDocument, RecordSource, RecordSourceError};
use search_reindex_shared::IndexResult;
use tracing::{debug, instrument, warn};

use crate::errors::ReindexError;

/// The reindex strategies an entity type supports.
///
/// `Err` means an infrastructure failure that must stop the run; failures
/// scoped to records or batches are reported inside the `IndexResult`.
#[async_trait]
pub trait EntityIndexer: Send + Sync {
    /// Index records updated on or after `from`.
    async fn from_date(
        &self,
        from: DateTime<Utc>,
        batch_size: usize,
    ) -> Result<IndexResult, ReindexError>;

    /// Index every record.
    async fn all(&self, batch_size: usize) -> Result<IndexResult, ReindexError>;

    /// Index records whose id lies in `[from, to)`.
    async fn by_id(&self, from: i64, to: i64, batch_size: usize)
        -> Result<IndexResult, ReindexError>;
}

/// Indexer over a record source and a shared bulk client.
pub struct Indexer<S> {
    client: Arc<dyn BulkClient>,
    source: S,
    index_name: String,
}

impl<S: RecordSource> Indexer<S> {
    /// Create an indexer writing to the physical index `index_name`.
    pub fn new(client: Arc<dyn BulkClient>, source: S, index_name: impl Into<String>) -> Self {
        Self {
            client,
            source,
            index_name: index_name.into(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Upsert one batch, recording its outcome in `result`.
    ///
    /// A transport failure is returned as an error. Any other bulk failure
    /// marks the whole batch as failed and lets the run continue.
    async fn index_batch(
        &self,
        documents: &[IndexDocument],
        result: &mut IndexResult,
    ) -> Result<(), ReindexError> {
        match self.client.bulk_upsert(&self.index_name, documents).await {
            Ok(summary) => {
                result.record_success(summary.succeeded);
                for failure in summary.failures() {
                    let reason = failure
                        .error
                        .as_ref()
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "unknown error".to_string());
                    result.record_failure(1, format!("id {}: {}", failure.id, reason));
                }
                Ok(())
            }
            Err(e) if e.is_transport() => Err(e.into()),
            Err(e) => {
                let first_id = documents.first().map(|d| d.id.as_str()).unwrap_or("-");
                warn!(
                    index = %self.index_name,
                    count = documents.len(),
                    first_id = %first_id,
                    error = %e,
                    "Bulk batch failed"
                );
                result.record_failure(
                    documents.len(),
                    format!(
                        "batch of {} starting at id {}: {}",
                        documents.len(),
                        first_id,
                        e
                    ),
                );
                Ok(())
            }
        }
    }
}

fn validate_batch_size(batch_size: usize) -> Result<(), ReindexError> {
    if batch_size == 0 {
        return Err(ReindexError::invalid_input(
            "-batch-size",
            "must be greater than zero",
        ));
    }
    Ok(())
}

#[async_trait]
impl<S: RecordSource> EntityIndexer for Indexer<S> {
    #[instrument(skip(self))]
    async fn from_date(
        &self,
        from: DateTime<Utc>,
        batch_size: usize,
    ) -> Result<IndexResult, ReindexError> {
        validate_batch_size(batch_size)?;
        let mut result = IndexResult::new();
        let mut after_id = i64::MIN;

        loop {
            let documents = self
                .source
                .fetch_updated_since(from, after_id, batch_size)
                .await?;
            let Some(last) = documents.last() else {
                break;
            };
            after_id = last.id.parse().map_err(|_| {
                RecordSourceError::serialization(format!("record id '{}' is not numeric", last.id))
            })?;

            debug!(count = documents.len(), after_id, "Indexing batch by date");
            self.index_batch(&documents, &mut result).await?;

            if documents.len() < batch_size {
                break;
            }
        }

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn all(&self, batch_size: usize) -> Result<IndexResult, ReindexError> {
        validate_batch_size(batch_size)?;
        match self.source.id_range().await? {
            Some((min, max)) => self.by_id(min, max.saturating_add(1), batch_size).await,
            None => {
                debug!("No records to index");
                Ok(IndexResult::new())
            }
        }
    }

    #[instrument(skip(self))]
    async fn by_id(
        &self,
        from: i64,
        to: i64,
        batch_size: usize,
    ) -> Result<IndexResult, ReindexError> {
        validate_batch_size(batch_size)?;
        let step = i64::try_from(batch_size).unwrap_or(i64::MAX);
        let mut result = IndexResult::new();
        let mut start = from;

        while start < to {
            let end = start.saturating_add(step).min(to);
            let documents = self.source.fetch_by_id(start, end).await?;
            if !documents.is_empty() {
                debug!(count = documents.len(), start, end, "Indexing batch by id");
                self.index_batch(&documents, &mut result).await?;
            }
            start = end;
        }

        Ok(result)
    }
}
