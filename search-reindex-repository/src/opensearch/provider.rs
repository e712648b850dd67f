//! OpenSearch bulk client implementation.
//!
//! This module provides the concrete implementation of `BulkClient`
//! using the OpenSearch Rust crate and the `_bulk` API.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::BulkClient;
use crate::types::{BulkOperationResult, BulkOperationSummary, IndexDocument};

/// OpenSearch bulk client.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchBulkClient::new("http://localhost:9200")?;
/// let docs = vec![IndexDocument::new("1", json!({ "firm_name": "Acme" }))];
/// let summary = client.bulk_upsert("firm_1a2b3c4d5e6f7a8b", &docs).await?;
/// ```
pub struct OpenSearchBulkClient {
    client: OpenSearch,
}

impl OpenSearchBulkClient {
    /// Create a new bulk client for the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchBulkClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL or transport is invalid
    pub fn new(url: &str) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(url = %url, "Created OpenSearch bulk client");

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Build the newline-delimited body of a `_bulk` request.
    ///
    /// Each document becomes an `index` action followed by its source, so
    /// existing documents with the same id are replaced.
    fn bulk_body(documents: &[IndexDocument]) -> Vec<JsonBody<Value>> {
        let mut body = Vec::with_capacity(documents.len() * 2);
        for doc in documents {
            body.push(JsonBody::new(json!({ "index": { "_id": doc.id } })));
            body.push(JsonBody::new(doc.body.clone()));
        }
        body
    }

    /// Turn a `_bulk` response body into a per-document summary.
    ///
    /// Items come back in request order. An item fails if it carries an
    /// `error` object or a status outside 2xx.
    fn summarize_response(
        documents: &[IndexDocument],
        response: &Value,
    ) -> Result<BulkOperationSummary, SearchIndexError> {
        let items = response["items"]
            .as_array()
            .ok_or_else(|| SearchIndexError::parse("bulk response has no items array"))?;

        if items.len() != documents.len() {
            return Err(SearchIndexError::parse(format!(
                "bulk response has {} items for {} documents",
                items.len(),
                documents.len()
            )));
        }

        let mut summary = BulkOperationSummary {
            total: documents.len(),
            ..Default::default()
        };

        for (doc, item) in documents.iter().zip(items) {
            let action = item
                .as_object()
                .and_then(|obj| obj.values().next())
                .ok_or_else(|| SearchIndexError::parse("bulk response item is empty"))?;

            let status = action["status"].as_u64().unwrap_or(0);
            let error = match action.get("error") {
                Some(err) if !err.is_null() => Some(Self::describe_item_error(err)),
                _ if !(200..300).contains(&status) => Some(format!("status {}", status)),
                _ => None,
            };

            match error {
                None => {
                    summary.succeeded += 1;
                    summary.results.push(BulkOperationResult {
                        id: doc.id.clone(),
                        success: true,
                        error: None,
                    });
                }
                Some(message) => {
                    summary.failed += 1;
                    summary.results.push(BulkOperationResult {
                        id: doc.id.clone(),
                        success: false,
                        error: Some(SearchIndexError::bulk_index(message)),
                    });
                }
            }
        }

        Ok(summary)
    }

    fn describe_item_error(err: &Value) -> String {
        match (err["type"].as_str(), err["reason"].as_str()) {
            (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
            (None, Some(reason)) => reason.to_string(),
            _ => err.to_string(),
        }
    }
}

#[async_trait]
impl BulkClient for OpenSearchBulkClient {
    async fn bulk_upsert(
        &self,
        index: &str,
        documents: &[IndexDocument],
    ) -> Result<BulkOperationSummary, SearchIndexError> {
        if index.is_empty() {
            return Err(SearchIndexError::validation("index name cannot be empty"));
        }
        if documents.is_empty() {
            return Ok(BulkOperationSummary::default());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(Self::bulk_body(documents))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = Self::summarize_response(documents, &body)?;
        debug!(
            index = %index,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk upsert completed"
        );
        Ok(summary)
    }
}
