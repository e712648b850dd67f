//! Live index selection.
//!
//! Picks at most one physical index per requested entity type from the
//! names currently deployed, matching on the `{alias}_` prefix.

use search_reindex_shared::EntityType;
use tracing::{debug, info};

/// The physical index chosen for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedIndex {
    pub entity: EntityType,
    pub index_name: String,
}

/// Choose the physical index for each requested entity type.
///
/// An empty `requested` selects every known type. For each type the first
/// name in `deployed` starting with `{alias}_` wins. Types without a match are
/// left out; an empty result means there is nothing to do.
pub fn select_indices(requested: &[EntityType], deployed: &[String]) -> Vec<SelectedIndex> {
    EntityType::ALL
        .into_iter()
        .filter(|entity| requested.is_empty() || requested.contains(entity))
        .filter_map(|entity| {
            let prefix = entity.index_prefix();
            match deployed.iter().find(|name| name.starts_with(&prefix)) {
                Some(name) => Some(SelectedIndex {
                    entity,
                    index_name: name.clone(),
                }),
                None => {
                    debug!(entity = %entity, "No deployed index matches entity type");
                    None
                }
            }
        })
        .collect()
}

/// Build one indexer per selected entity type.
///
/// `build` is called exactly once for each entity type that has a deployed
/// index, with the physical index name it should write to.
pub fn select<I>(
    requested: &[EntityType],
    deployed: &[String],
    mut build: impl FnMut(EntityType, &str) -> I,
) -> Vec<(EntityType, I)> {
    select_indices(requested, deployed)
        .into_iter()
        .map(|selected| {
            info!(
                entity = %selected.entity,
                index = %selected.index_name,
                "Selected index"
            );
            let indexer = build(selected.entity, &selected.index_name);
            (selected.entity, indexer)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_selects_both_types() {
        let deployed = names(&["firm_aabbccdd", "person_11223344"]);
        let selected = select_indices(&[EntityType::Firm, EntityType::Person], &deployed);

        assert_eq!(
            selected,
            vec![
                SelectedIndex {
                    entity: EntityType::Firm,
                    index_name: "firm_aabbccdd".to_string()
                },
                SelectedIndex {
                    entity: EntityType::Person,
                    index_name: "person_11223344".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_request_selects_all() {
        let deployed = names(&["firm_aabbccdd", "person_11223344"]);
        let selected = select_indices(&[], &deployed);

        let entities: Vec<EntityType> = selected.iter().map(|s| s.entity).collect();
        assert_eq!(entities, vec![EntityType::Firm, EntityType::Person]);
    }

    #[test]
    fn test_no_deployed_names() {
        assert!(select_indices(&[], &[]).is_empty());
        assert!(select_indices(&[EntityType::Firm], &[]).is_empty());
    }

    #[test]
    fn test_single_type_request() {
        let deployed = names(&["firm_aabbccdd", "person_11223344"]);
        let selected = select_indices(&[EntityType::Person], &deployed);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].index_name, "person_11223344");
    }

    #[test]
    fn test_first_matching_name_wins() {
        let deployed = names(&["person_11223344", "firm_00000001", "firm_00000002"]);
        let selected = select_indices(&[EntityType::Firm], &deployed);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].index_name, "firm_00000001");
    }

    #[test]
    fn test_unmatched_type_is_omitted() {
        let deployed = names(&["person_11223344", "firmware_1"]);
        let selected = select_indices(&[EntityType::Firm, EntityType::Person], &deployed);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].entity, EntityType::Person);
    }

    #[test]
    fn test_select_builds_once_per_type() {
        let deployed = names(&["firm_a", "firm_b", "person_c"]);
        let mut calls = Vec::new();

        let indexers = select(&[], &deployed, |entity, name| {
            calls.push((entity, name.to_string()));
            format!("indexer for {}", name)
        });

        assert_eq!(
            calls,
            vec![
                (EntityType::Firm, "firm_a".to_string()),
                (EntityType::Person, "person_c".to_string())
            ]
        );
        assert_eq!(indexers[0], (EntityType::Firm, "indexer for firm_a".to_string()));
    }
}
