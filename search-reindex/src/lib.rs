//! # Search Reindex
//!
//! Batch reindex job: reads firm and person records from PostgreSQL and bulk
//! indexes them into versioned OpenSearch indices. Run by operators or
//! schedulers; it does not serve requests.
//!
//! ## Flow
//!
//! 1. **Credentials**: resolve the database connection string, falling back to
//!    the secret store for the password
//! 2. **Selector**: pick the live physical index for each requested entity type
//! 3. **Orchestrator**: run one batch strategy (since date, all, id range)
//!    through every selected indexer, stopping at the first infrastructure error
//! 4. **Report**: log the outcome of each entity type
//!
//! ## Modules
//!
//! - [`cli`]: Command-line surface
//! - [`config`]: Configuration, credentials and dependency wiring
//! - [`indexer`]: Per-entity indexers over a record source and bulk client
//! - [`selector`]: Live index selection per entity type
//! - [`orchestrator`]: Batch strategy dispatch
//! - [`report`]: Result reporting
//! - [`errors`]: Error types

pub mod cli;
pub mod config;
pub mod errors;
pub mod indexer;
pub mod orchestrator;
pub mod report;
pub mod selector;

pub use config::{Dependencies, ReindexConfig};
pub use errors::ReindexError;
pub use orchestrator::{BatchRequest, Orchestrator};
