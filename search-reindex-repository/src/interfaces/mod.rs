//! Interface definitions for the reindex collaborators.
//!
//! These traits allow for dependency injection and swappable backends: the
//! production implementations live in this crate and tests provide mocks.

mod bulk_client;
mod record_source;
mod secret_store;

pub use bulk_client::BulkClient;
pub use record_source::RecordSource;
pub use secret_store::SecretStore;
