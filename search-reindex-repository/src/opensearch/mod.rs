//! OpenSearch implementation of the bulk client.
//!
//! This module provides a concrete implementation of `BulkClient` using
//! OpenSearch as the backend, along with the versioned index configuration.

mod index_config;
mod provider;

pub use index_config::{
    firm_index_settings, person_index_settings, versioned_index_name, IndexConfig,
};
pub use provider::OpenSearchBulkClient;
