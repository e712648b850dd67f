//! # Search Reindex Shared
//!
//! This crate defines shared data structures used across the search reindex
//! crates: the entity types that can be reindexed, the per-type outcome of a
//! reindex run, and the documents written to each index.

pub mod types;

pub use types::documents::{FirmDocument, PersonDocument};
pub use types::entity_type::EntityType;
pub use types::index_result::IndexResult;
