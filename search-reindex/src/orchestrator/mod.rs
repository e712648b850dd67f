//! Orchestrator module for the search reindex job.
//!
//! Runs one batch strategy through every selected indexer, in order.

mod request;

pub use request::BatchRequest;

use search_reindex_shared::{EntityType, IndexResult};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::errors::ReindexError;
use crate::indexer::EntityIndexer;
use crate::report;

/// Orchestrator that drives the selected indexers.
///
/// The orchestrator:
/// - Applies the same strategy to every entity type
/// - Processes entity types sequentially, in selection order
/// - Stops at the first infrastructure error; later types never start
/// - Stops the in-flight indexer when a shutdown signal arrives
pub struct Orchestrator {
    indexers: Vec<(EntityType, Box<dyn EntityIndexer>)>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Orchestrator {
    /// Create a new orchestrator over the given indexers.
    pub fn new(indexers: Vec<(EntityType, Box<dyn EntityIndexer>)>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self::with_shutdown(indexers, shutdown_tx)
    }

    /// Create a new orchestrator listening on an existing shutdown channel.
    pub fn with_shutdown(
        indexers: Vec<(EntityType, Box<dyn EntityIndexer>)>,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            indexers,
            shutdown_tx,
        }
    }

    /// The entity types this orchestrator will run, in order.
    pub fn entities(&self) -> Vec<EntityType> {
        self.indexers.iter().map(|(entity, _)| *entity).collect()
    }

    /// Run `request` through every indexer.
    ///
    /// Each entity type is reported as soon as it completes. The first error
    /// aborts the run and is returned; results of entity types that already
    /// completed have been reported by then.
    #[instrument(skip(self), fields(strategy = request.strategy()))]
    pub async fn run(
        &self,
        request: &BatchRequest,
    ) -> Result<Vec<(EntityType, IndexResult)>, ReindexError> {
        if self.indexers.is_empty() {
            info!("No deployed index matches the requested entity types, nothing to do");
            return Ok(Vec::new());
        }

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut results = Vec::with_capacity(self.indexers.len());

        for (entity, indexer) in &self.indexers {
            let entity = *entity;
            Self::log_start(entity, request);

            let result = tokio::select! {
                result = Self::dispatch(indexer.as_ref(), request) => result?,
                _ = shutdown_rx.recv() => {
                    warn!(entity = %entity, "Shutdown requested, abandoning reindex");
                    return Err(ReindexError::Cancelled);
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    let _ = self.shutdown_tx.send(());
                    return Err(ReindexError::Cancelled);
                }
            };

            report::report(entity, &result);
            results.push((entity, result));
        }

        Ok(results)
    }

    /// Call the indexer method matching `request`.
    async fn dispatch(
        indexer: &dyn EntityIndexer,
        request: &BatchRequest,
    ) -> Result<IndexResult, ReindexError> {
        match *request {
            BatchRequest::FromDate { from, batch_size } => indexer.from_date(from, batch_size).await,
            BatchRequest::All { batch_size } => indexer.all(batch_size).await,
            BatchRequest::ById {
                from,
                to,
                batch_size,
            } => indexer.by_id(from, to, batch_size).await,
        }
    }

    fn log_start(entity: EntityType, request: &BatchRequest) {
        match request {
            BatchRequest::FromDate { from, batch_size } => info!(
                entity = %entity,
                from = %from.to_rfc3339(),
                batch_size,
                "Indexing by date"
            ),
            BatchRequest::All { batch_size } => {
                info!(entity = %entity, batch_size, "Indexing all records")
            }
            BatchRequest::ById {
                from,
                to,
                batch_size,
            } => info!(entity = %entity, from, to, batch_size, "Indexing by id"),
        }
    }

    /// Trigger a shutdown of the current run.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
