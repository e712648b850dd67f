//! This module defines the core data structures and types used across the search reindex job.
//! It re-exports `EntityType`, `IndexResult` and the document types.

pub mod documents;
pub mod entity_type;
pub mod index_result;

pub use documents::{FirmDocument, PersonDocument};
pub use entity_type::EntityType;
pub use index_result::IndexResult;
