//! Search Reindex Main Entry Point
//!
//! Batch job that reindexes firm and person records from PostgreSQL into the
//! versioned OpenSearch indices.

use dotenv::dotenv;
use search_reindex::cli::{Cli, Command, IndexArgs};
use search_reindex::{Dependencies, ReindexConfig, ReindexError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("search_reindex=info,search_reindex_repository=info"));

    let json = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "search-reindex",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

/// Run the `index` command.
///
/// The database connection is closed before returning, whether the run
/// succeeded or not.
async fn run_index(args: &IndexArgs) -> Result<(), ReindexError> {
    let request = args.batch_request()?;
    let config = ReindexConfig::from_env();

    let deps = Dependencies::new(&config, &args.requested_entities()).await?;
    let outcome = deps.orchestrator.run(&request).await;
    deps.pool.close().await;

    let results = outcome?;
    info!(
        entity_types = results.len(),
        strategy = request.strategy(),
        "Reindex completed"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ReindexError> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse_normalized(env::args());

    init_tracing();

    match cli.command {
        Command::Index(args) => match run_index(&args).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(error = %e, "Reindex failed");
                Err(e)
            }
        },
    }
}
