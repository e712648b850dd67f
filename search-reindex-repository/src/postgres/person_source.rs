//! PostgreSQL record source for persons.
//!
//! Reads the `persons` table joined to the client's primary address and the
//! case reference number, and maps each row to a [`PersonDocument`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use search_reindex_shared::PersonDocument;

use crate::errors::RecordSourceError;
use crate::interfaces::RecordSource;
use crate::postgres::sql_limit;
use crate::types::IndexDocument;

const SELECT_PERSON: &str = "SELECT p.id::bigint AS id, p.uid::bigint AS uid, \
     p.type AS person_type, p.caserecnumber AS case_rec_number, \
     p.firstname AS first_name, p.surname, \
     to_char(p.dob, 'DD/MM/YYYY') AS dob, p.email, \
     (SELECT a.postcode FROM addresses a WHERE a.person_id = p.id ORDER BY a.id LIMIT 1) AS postcode, \
     p.updateddate::timestamptz AS updated_at \
     FROM persons p";

#[derive(Debug, sqlx::FromRow)]
struct PersonRow {
    id: i64,
    uid: Option<i64>,
    person_type: Option<String>,
    case_rec_number: Option<String>,
    first_name: Option<String>,
    surname: Option<String>,
    dob: Option<String>,
    email: Option<String>,
    postcode: Option<String>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<PersonRow> for PersonDocument {
    fn from(row: PersonRow) -> Self {
        PersonDocument {
            id: row.id,
            uid: row.uid,
            person_type: row.person_type,
            case_rec_number: row.case_rec_number,
            first_name: row.first_name,
            surname: row.surname,
            dob: row.dob,
            email: row.email,
            postcode: row.postcode,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL-backed person record source.
pub struct PostgresPersonSource {
    pool: sqlx::PgPool,
}

impl PostgresPersonSource {
    /// Creates a new person record source over `pool`.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    fn to_documents(rows: Vec<PersonRow>) -> Result<Vec<IndexDocument>, RecordSourceError> {
        rows.into_iter()
            .map(|row| {
                let doc = PersonDocument::from(row);
                IndexDocument::from_serializable(doc.document_id(), &doc)
                    .map_err(RecordSourceError::from)
            })
            .collect()
    }
}

#[async_trait]
impl RecordSource for PostgresPersonSource {
    async fn id_range(&self) -> Result<Option<(i64, i64)>, RecordSourceError> {
        let (min, max): (Option<i64>, Option<i64>) =
            sqlx::query_as("SELECT MIN(id)::bigint, MAX(id)::bigint FROM persons")
                .fetch_one(&self.pool)
                .await?;

        Ok(min.zip(max))
    }

    async fn fetch_by_id(
        &self,
        from: i64,
        to: i64,
    ) -> Result<Vec<IndexDocument>, RecordSourceError> {
        let query = format!(
            "{} WHERE p.id >= $1 AND p.id < $2 ORDER BY p.id",
            SELECT_PERSON
        );
        let rows: Vec<PersonRow> = sqlx::query_as(&query)
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
            "{} WHERE p.updateddate >= $1 AND p.id > $2 ORDER BY p.id LIMIT $3",
            SELECT_PERSON
        );
        let rows: Vec<PersonRow> = sqlx::query_as(&query)
            .bind(since)
            .bind(after_id)
            .bind(sql_limit(limit)?)
            .fetch_all(&self.pool)
            .await?;

        Self::to_documents(rows)
    }
}
