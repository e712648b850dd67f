//! Result reporting.
//!
//! Turns the `IndexResult` of an entity type into operator-facing log lines.

use search_reindex_shared::{EntityType, IndexResult};
use tracing::{info, warn};

/// Render the report lines for one entity type.
///
/// The first line is the summary; each error follows on its own line, in
/// the order it was recorded.
pub fn render(entity: EntityType, result: &IndexResult) -> Vec<String> {
    std::iter::once(format!(
        "indexing done entity={} successful={} failed={}",
        entity, result.successful, result.failed
    ))
    .chain(result.errors.iter().cloned())
    .collect()
}

/// Log the outcome of one entity type.
pub fn report(entity: EntityType, result: &IndexResult) {
    let mut lines = render(entity, result).into_iter();

    if let Some(summary) = lines.next() {
        info!(
            entity = %entity,
            successful = result.successful,
            failed = result.failed,
            "{}",
            summary
        );
    }
    for line in lines {
        warn!(entity = %entity, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary_then_errors_in_order() {
        let result = IndexResult {
            successful: 7,
            failed: 2,
            errors: vec!["e1".to_string(), "e2".to_string()],
        };

        let lines = render(EntityType::Firm, &result);

        assert_eq!(
            lines,
            vec![
                "indexing done entity=firm successful=7 failed=2".to_string(),
                "e1".to_string(),
                "e2".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_without_errors() {
        let lines = render(EntityType::Person, &IndexResult::new());
        assert_eq!(lines, vec!["indexing done entity=person successful=0 failed=0"]);
    }
}
