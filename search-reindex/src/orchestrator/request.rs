//! Batch strategy selection.

use chrono::{DateTime, Utc};

use crate::errors::ReindexError;

/// The single reindex strategy applied to every entity type in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchRequest {
    /// Index records updated on or after `from`.
    FromDate {
        from: DateTime<Utc>,
        batch_size: usize,
    },
    /// Index every record.
    All { batch_size: usize },
    /// Index records whose id lies in `[from, to)`.
    ById {
        from: i64,
        to: i64,
        batch_size: usize,
    },
}

impl BatchRequest {
    /// Choose the strategy from command-line style inputs.
    ///
    /// A non-empty date filter takes precedence over `all`, which takes
    /// precedence over the id range. An empty date filter counts as absent.
    ///
    /// # Errors
    ///
    /// * `-from-date` is set but not an RFC 3339 timestamp
    /// * `-batch-size` is zero
    pub fn from_flags(
        from_date: Option<&str>,
        all: bool,
        from: i64,
        to: i64,
        batch_size: usize,
    ) -> Result<Self, ReindexError> {
        if batch_size == 0 {
            return Err(ReindexError::invalid_input(
                "-batch-size",
                "must be greater than zero",
            ));
        }

        if let Some(raw) = from_date.filter(|s| !s.is_empty()) {
            let from = DateTime::parse_from_rfc3339(raw)
                .map_err(|e| ReindexError::invalid_input("-from-date", e.to_string()))?
                .with_timezone(&Utc);
            return Ok(Self::FromDate { from, batch_size });
        }

        if all {
            return Ok(Self::All { batch_size });
        }

        Ok(Self::ById {
            from,
            to,
            batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        match self {
            Self::FromDate { batch_size, .. }
            | Self::All { batch_size }
            | Self::ById { batch_size, .. } => *batch_size,
        }
    }

    /// Short name of the strategy, for logs.
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::FromDate { .. } => "from_date",
            Self::All { .. } => "all",
            Self::ById { .. } => "by_id",
        }
    }
}
