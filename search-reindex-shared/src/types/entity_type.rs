//! Entity types that can be reindexed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A family of records backed by one search index alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Firm,
    Person,
}

impl EntityType {
    /// Every known entity type, in the order they are reindexed.
    pub const ALL: [EntityType; 2] = [EntityType::Firm, EntityType::Person];

    /// The index alias for this entity type (e.g. "firm").
    pub fn alias(&self) -> &'static str {
        match self {
            EntityType::Firm => "firm",
            EntityType::Person => "person",
        }
    }

    /// Prefix shared by every physical index name of this alias.
    pub fn index_prefix(&self) -> String {
        format!("{}_", self.alias())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.alias() == s)
            .ok_or_else(|| format!("unknown entity type '{}'", s))
    }
}
