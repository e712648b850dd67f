//! PostgreSQL implementations of the record source.
//!
//! Each entity type reads from its own table through a shared `sqlx::PgPool`.
//! Identifiers are cast to `bigint` in SQL so `INT4` and `INT8` id columns
//! decode the same way.

mod firm_source;
mod person_source;

pub use firm_source::PostgresFirmSource;
pub use person_source::PostgresPersonSource;

use crate::errors::RecordSourceError;

/// Convert a page size into a SQL `LIMIT` value.
fn sql_limit(limit: usize) -> Result<i64, RecordSourceError> {
    i64::try_from(limit)
        .map_err(|_| RecordSourceError::serialization(format!("limit {} out of range", limit)))
}
