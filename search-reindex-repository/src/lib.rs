//! # Search Reindex Repository
//!
//! This crate provides the collaborator interfaces the reindex job depends on
//! and their concrete implementations:
//!
//! - [`BulkClient`]: batched upserts into a physical search index (OpenSearch)
//! - [`RecordSource`]: paged record fetches per entity type (PostgreSQL)
//! - [`SecretStore`]: secret lookups for credentials (mounted secret files)
//!
//! It also owns the versioned index configuration used to derive physical
//! index names.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod postgres;
pub mod secrets;
pub mod types;

pub use errors::{RecordSourceError, SearchIndexError, SecretStoreError};
pub use interfaces::{BulkClient, RecordSource, SecretStore};
pub use opensearch::{IndexConfig, OpenSearchBulkClient};
pub use postgres::{PostgresFirmSource, PostgresPersonSource};
pub use secrets::FileSecretStore;
pub use types::{BulkOperationResult, BulkOperationSummary, IndexDocument};
