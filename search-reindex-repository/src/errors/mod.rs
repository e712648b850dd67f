//! Error types for the search reindex repository.
//!
//! One error type per collaborator interface.

mod record_source_error;
mod search_index_error;
mod secret_store_error;

pub use record_source_error::RecordSourceError;
pub use search_index_error::SearchIndexError;
pub use secret_store_error::SecretStoreError;
