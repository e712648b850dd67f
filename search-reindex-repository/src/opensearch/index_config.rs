//! OpenSearch index configuration and mappings.
//!
//! Physical index names are content addressed: the name of an index is its
//! alias followed by a digest of its settings and mappings. Changing the
//! configuration yields a new physical index and leaves the old one untouched.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::errors::SearchIndexError;

/// Number of digest bytes kept in a physical index name.
const NAME_DIGEST_BYTES: usize = 8;

/// Configuration for one versioned search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The alias for the index (e.g. "firm", "person").
    pub alias: String,
    /// The physical index name on the cluster, including the config digest.
    pub name: String,
    /// The serialized settings and mappings.
    pub config: Vec<u8>,
}

impl IndexConfig {
    /// Create a new index configuration from raw configuration bytes.
    ///
    /// # Arguments
    ///
    /// * `alias` - The index alias name
    /// * `config` - The configuration payload the name is derived from
    pub fn new(alias: impl Into<String>, config: Vec<u8>) -> Self {
        let alias = alias.into();
        let name = versioned_index_name(&alias, &config);
        Self {
            alias,
            name,
            config,
        }
    }

    /// Create an index configuration from a configuration producer.
    ///
    /// Any error from `producer` is returned unchanged.
    pub fn load<E>(
        alias: impl Into<String>,
        producer: impl FnOnce() -> Result<Vec<u8>, E>,
    ) -> Result<Self, E> {
        Ok(Self::new(alias, producer()?))
    }

    /// Create an index configuration from a JSON settings document.
    pub fn from_settings(alias: impl Into<String>, settings: &Value) -> Result<Self, SearchIndexError> {
        let config = serde_json::to_vec(settings)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;
        Ok(Self::new(alias, config))
    }

    /// The current firm index configuration.
    pub fn firm() -> Result<Self, SearchIndexError> {
        Self::from_settings("firm", &firm_index_settings())
    }

    /// The current person index configuration.
    pub fn person() -> Result<Self, SearchIndexError> {
        Self::from_settings("person", &person_index_settings())
    }
}

/// Get the versioned physical index name for `alias` and `config`.
///
/// # Returns
///
/// `{alias}_{hex}` where `hex` is the first 8 bytes of the SHA-256 digest of
/// `config` (e.g. "firm_1a2b3c4d5e6f7a8b")
pub fn versioned_index_name(alias: &str, config: &[u8]) -> String {
    let digest = Sha256::digest(config);
    format!("{}_{}", alias, hex::encode(&digest[..NAME_DIGEST_BYTES]))
}

/// Get the index settings and mappings for the firm index.
pub fn firm_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": { "type": "long" },
                "firm_name": {
                    "type": "text",
                    "fields": { "raw": { "type": "keyword" } }
                },
                "firm_number": { "type": "keyword" },
                "email": { "type": "keyword" },
                "phone_number": { "type": "keyword" },
                "address_line_1": { "type": "text" },
                "town": { "type": "text" },
                "postcode": { "type": "keyword" },
                "updated_at": { "type": "date" }
            }
        }
    })
}

/// Get the index settings and mappings for the person index.
///
/// Names are analysed as text for fuzzy lookups and kept as keywords for
/// exact matches; identifiers are keywords only.
pub fn person_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": { "type": "long" },
                "uid": { "type": "keyword" },
                "person_type": { "type": "keyword" },
                "case_rec_number": { "type": "keyword" },
                "first_name": {
                    "type": "text",
                    "fields": { "raw": { "type": "keyword" } }
                },
                "surname": {
                    "type": "text",
                    "fields": { "raw": { "type": "keyword" } }
                },
                "dob": { "type": "keyword" },
                "email": { "type": "keyword" },
                "postcode": { "type": "keyword" },
                "updated_at": { "type": "date" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_deterministic() {
        let first = IndexConfig::new("firm", b"{\"a\":1}".to_vec());
        let second = IndexConfig::new("firm", b"{\"a\":1}".to_vec());
        assert_eq!(first.name, second.name);
        assert_eq!(first, second);
    }

    #[test]
    fn test_changed_config_changes_name() {
        let first = IndexConfig::new("firm", b"{\"a\":1}".to_vec());
        let second = IndexConfig::new("firm", b"{\"a\":2}".to_vec());
        assert_ne!(first.name, second.name);
    }

    #[test]
    fn test_name_format() {
        // sha256("") = e3b0c44298fc1c149afbf4c8996fb924...
        assert_eq!(versioned_index_name("person", b""), "person_e3b0c44298fc1c14");

        let config = IndexConfig::new("firm", b"anything".to_vec());
        let suffix = config.name.strip_prefix("firm_").unwrap();
        assert_eq!(suffix.len(), 16);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_load_propagates_producer_error() {
        let result = IndexConfig::load("firm", || Err::<Vec<u8>, _>("missing mapping file"));
        assert_eq!(result.unwrap_err(), "missing mapping file");

        let loaded = IndexConfig::load("firm", || Ok::<_, String>(b"x".to_vec())).unwrap();
        assert_eq!(loaded, IndexConfig::new("firm", b"x".to_vec()));
    }

    #[test]
    fn test_current_configs_have_distinct_prefixes() {
        let firm = IndexConfig::firm().unwrap();
        let person = IndexConfig::person().unwrap();
        assert!(firm.name.starts_with("firm_"));
        assert!(person.name.starts_with("person_"));
        assert_eq!(firm.name, IndexConfig::firm().unwrap().name);
    }

    #[test]
    fn test_index_settings_structure() {
        for settings in [firm_index_settings(), person_index_settings()] {
            assert!(settings["settings"]["number_of_shards"].is_number());
            assert!(settings["settings"]["number_of_replicas"].is_number());
            assert_eq!(settings["mappings"]["properties"]["id"]["type"], "long");
            assert_eq!(settings["mappings"]["properties"]["updated_at"]["type"], "date");
        }

        let person = person_index_settings();
        assert_eq!(
            person["mappings"]["properties"]["surname"]["fields"]["raw"]["type"],
            "keyword"
        );
    }
}
