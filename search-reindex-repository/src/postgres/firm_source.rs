//! PostgreSQL record source for firms.
//!
//! Reads the `firm` table and maps each row to a [`FirmDocument`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use search_reindex_shared::FirmDocument;

use crate::errors::RecordSourceError;
use crate::interfaces::RecordSource;
use crate::postgres::sql_limit;
use crate::types::IndexDocument;

const SELECT_FIRM: &str = "SELECT f.id::bigint AS id, f.firmname AS firm_name, \
     f.firmnumber::text AS firm_number, f.email, f.phonenumber AS phone_number, \
     f.addressline1 AS address_line_1, f.town, f.postcode, \
     f.updateddate::timestamptz AS updated_at \
     FROM firm f";

#[derive(Debug, sqlx::FromRow)]
struct FirmRow {
    id: i64,
    firm_name: Option<String>,
    firm_number: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    address_line_1: Option<String>,
    town: Option<String>,
    postcode: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<FirmRow> for FirmDocument {
    fn from(row: FirmRow) -> Self {
        FirmDocument {
            id: row.id,
            firm_name: row.firm_name,
            firm_number: row.firm_number,
            email: row.email,
            phone_number: row.phone_number,
            address_line_1: row.address_line_1,
            town: row.town,
            postcode: row.postcode,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed firm record source.
pub struct PostgresFirmSource {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
}

impl PostgresFirmSource {
    /// Creates a new firm record source over `pool`.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    fn to_documents(rows: Vec<FirmRow>) -> Result<Vec<IndexDocument>, RecordSourceError> {
        rows.into_iter()
            .map(|row| {
                let doc = FirmDocument::from(row);
                IndexDocument::from_serializable(doc.document_id(), &doc)
                    .map_err(RecordSourceError::from)
            })
            .collect()
    }
}

#[async_trait]
impl RecordSource for PostgresFirmSource {
    async fn id_range(&self) -> Result<Option<(i64, i64)>, RecordSourceError> {
        let (min, max): (Option<i64>, Option<i64>) =
            sqlx::query_as("SELECT MIN(id)::bigint, MAX(id)::bigint FROM firm")
                .fetch_one(&self.pool)
                .await?;

        Ok(min.zip(max))
    }

    async fn fetch_by_id(
        &self,
        from: i64,
        to: i64,
    ) -> Result<Vec<IndexDocument>, RecordSourceError> {
        let query = format!("{} WHERE f.id >= $1 AND f.id < $2 ORDER BY f.id", SELECT_FIRM);
        let rows: Vec<FirmRow> = sqlx::query_as(&query)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Self::to_documents(rows)
    }

    async fn fetch_updated_since(
        &self,
        since: DateTime<Utc>,
        after_id: i64,
        limit: usize,
    ) -> Result<Vec<IndexDocument>, RecordSourceError> {
        let query = format!(
            "{} WHERE f.updateddate >= $1 AND f.id > $2 ORDER BY f.id LIMIT $3",
            SELECT_FIRM
        );
        let rows: Vec<FirmRow> = sqlx::query_as(&query)
            .bind(since)
            .bind(after_id)
            .bind(sql_limit(limit)?)
            .fetch_all(&self.pool)
            .await?;

        Self::to_documents(rows)
    }
}
