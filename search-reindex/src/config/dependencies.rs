//! Dependency initialization and wiring for the reindex job.

use std::sync::Arc;

use search_reindex_repository::{
    BulkClient, FileSecretStore, IndexConfig, OpenSearchBulkClient, PostgresFirmSource,
    PostgresPersonSource, SecretStore,
};
use search_reindex_shared::EntityType;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};
use tracing::info;

use crate::config::{credentials, ReindexConfig};
use crate::errors::ReindexError;
use crate::indexer::{EntityIndexer, Indexer};
use crate::orchestrator::Orchestrator;
use crate::selector;

/// Container for all initialized dependencies of one reindex run.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
    /// The single database connection owned by this run.
    pub pool: PgPool,
}

impl Dependencies {
    /// Initialize all dependencies.
    ///
    /// Resolves credentials, opens and pings the one database connection, and
    /// builds an indexer for each requested entity type that has a deployed
    /// index.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ReindexError)` - Configuration, secret, connectivity or client errors
    pub async fn new(
        config: &ReindexConfig,
        requested: &[EntityType],
    ) -> Result<Self, ReindexError> {
        let secrets = FileSecretStore::new(&config.secrets_dir);
        let client: Arc<dyn BulkClient> = Arc::new(OpenSearchBulkClient::new(&config.opensearch_url)?);
        let deployed = current_index_names()?;

        Self::with_collaborators(config, &secrets, client, &deployed, requested).await
    }

    /// Initialize dependencies with explicit collaborators.
    pub async fn with_collaborators(
        config: &ReindexConfig,
        secrets: &dyn SecretStore,
        client: Arc<dyn BulkClient>,
        deployed: &[String],
        requested: &[EntityType],
    ) -> Result<Self, ReindexError> {
        let connection_string = credentials::resolve(&config.db, secrets).await?;

        info!(
            host = config.db.host.as_deref().unwrap_or_default(),
            database = config.db.database.as_deref().unwrap_or_default(),
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(connection_string.expose())
            .await?;

        if let Err(e) = ping(&pool).await {
            pool.close().await;
            return Err(e);
        }

        info!("Database connection established");

        let indexers = selector::select(requested, deployed, |entity, index_name| {
            build_indexer(entity, index_name, client.clone(), pool.clone())
        });

        Ok(Self {
            orchestrator: Orchestrator::new(indexers),
            pool,
        })
    }
}

/// The physical names of the indices built from the current configuration.
pub fn current_index_names() -> Result<Vec<String>, ReindexError> {
    Ok(vec![IndexConfig::firm()?.name, IndexConfig::person()?.name])
}

async fn ping(pool: &PgPool) -> Result<(), ReindexError> {
    let mut conn = pool.acquire().await?;
    conn.ping().await?;
    Ok(())
}

fn build_indexer(
    entity: EntityType,
    index_name: &str,
    client: Arc<dyn BulkClient>,
    pool: PgPool,
) -> Box<dyn EntityIndexer> {
    match entity {
        EntityType::Firm => Box::new(Indexer::new(
            client,
            PostgresFirmSource::new(pool),
            index_name,
        )),
        EntityType::Person => Box::new(Indexer::new(
            client,
            PostgresPersonSource::new(pool),
            index_name,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_index_names() {
        let names = current_index_names().unwrap();
        assert_eq!(names.len(), 2);
        assert!(names[0].starts_with("firm_"));
        assert!(names[1].starts_with("person_"));
        assert_eq!(names, current_index_names().unwrap());
    }
}
