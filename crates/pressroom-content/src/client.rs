//! HTTP client for the content store.
//!
//! The store speaks a Sanity-compatible API: a GROQ query endpoint for
//! lookups and a mutation endpoint for create/patch. Queries here are
//! exact-match only; the pipeline never needs anything richer.

use std::time::Duration;

use async_trait::async_trait;
use pressroom_core::{NewsItem, NewsItemPatch};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const API_VERSION: &str = "v2022-03-07";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ContentStoreError {
    #[error("Content store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Content store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected content store response: {0}")]
    Decode(String),
}

/// Collaborator seam for News Item persistence. Implemented by
/// [`ContentStoreClient`] in production and by in-memory fakes in tests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Lookup by idempotency description key. Created items carry the key as
    /// the leading segment of their description (an archive locator may
    /// follow), so the lookup is a deterministic prefix match. Returns the
    /// existing item id, if any.
    async fn find_item_id_by_description(
        &self,
        description: &str,
    ) -> Result<Option<String>, ContentStoreError>;

    /// Create a news item; returns the created id.
    async fn create_item(&self, item: &NewsItem) -> Result<String, ContentStoreError>;

    /// Apply a partial update to an existing item.
    async fn patch_item(
        &self,
        item_id: &str,
        patch: &NewsItemPatch,
    ) -> Result<(), ContentStoreError>;

    /// Resolve the attached source-file URL of an existing item, if any.
    async fn resolve_attachment_url(
        &self,
        item_id: &str,
    ) -> Result<Option<String>, ContentStoreError>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    id: String,
}

/// HTTP client for the content store with token auth.
#[derive(Clone, Debug)]
pub struct ContentStoreClient {
    client: reqwest::Client,
    base_url: String,
    dataset: String,
    token: Option<String>,
}

impl ContentStoreClient {
    pub fn new(
        base_url: String,
        dataset: String,
        token: Option<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            dataset,
            token,
        })
    }

    fn query_url(&self) -> String {
        format!(
            "{}/{}/data/query/{}",
            self.base_url, API_VERSION, self.dataset
        )
    }

    fn mutate_url(&self) -> String {
        format!(
            "{}/{}/data/mutate/{}",
            self.base_url, API_VERSION, self.dataset
        )
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Run a GROQ query with one string parameter and decode the result.
    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        groq: &str,
        param: (&str, &str),
    ) -> Result<Option<T>, ContentStoreError> {
        let (name, value) = param;
        // Query parameters are JSON-encoded per the API contract.
        let params = vec![
            ("query".to_string(), groq.to_string()),
            (format!("${}", name), json!(value).to_string()),
        ];
        let request = self.client.get(self.query_url()).query(&params);

        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentStoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: QueryResponse<T> = response
            .json()
            .await
            .map_err(|e| ContentStoreError::Decode(e.to_string()))?;
        Ok(parsed.result)
    }

    async fn mutate(
        &self,
        mutations: serde_json::Value,
    ) -> Result<MutateResponse, ContentStoreError> {
        let request = self
            .client
            .post(self.mutate_url())
            .query(&[("returnIds", "true")])
            .json(&json!({ "mutations": mutations }));

        let response = self.apply_auth(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentStoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ContentStoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for ContentStoreClient {
    async fn find_item_id_by_description(
        &self,
        description: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        let groq = format!(
            "*[_type == \"{}\" && string::startsWith(description, $desc)][0]._id",
            NewsItem::DOC_TYPE
        );
        self.query::<String>(&groq, ("desc", description)).await
    }

    async fn create_item(&self, item: &NewsItem) -> Result<String, ContentStoreError> {
        let mutations = json!([{ "create": item }]);
        let response = self.mutate(mutations).await?;

        let id = response
            .results
            .into_iter()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| {
                ContentStoreError::Decode("mutation response contained no ids".to_string())
            })?;

        tracing::info!(item_id = %id, title = %item.title, "News item created");
        Ok(id)
    }

    async fn patch_item(
        &self,
        item_id: &str,
        patch: &NewsItemPatch,
    ) -> Result<(), ContentStoreError> {
        let mutations = json!([{ "patch": { "id": item_id, "set": patch } }]);
        self.mutate(mutations).await?;

        tracing::info!(item_id = %item_id, "News item patched");
        Ok(())
    }

    async fn resolve_attachment_url(
        &self,
        item_id: &str,
    ) -> Result<Option<String>, ContentStoreError> {
        let groq = "*[_id == $id][0].originalDoc.asset->url";
        self.query::<String>(groq, ("id", item_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = ContentStoreClient::new(
            "https://cms.example.com/".to_string(),
            "production".to_string(),
            None,
        )
        .expect("client");

        assert_eq!(
            client.query_url(),
            "https://cms.example.com/v2022-03-07/data/query/production"
        );
        assert_eq!(
            client.mutate_url(),
            "https://cms.example.com/v2022-03-07/data/mutate/production"
        );
    }

    #[test]
    fn test_query_response_decodes_null_result() {
        let parsed: QueryResponse<String> = serde_json::from_str("{\"result\": null}").unwrap();
        assert!(parsed.result.is_none());

        let parsed: QueryResponse<String> =
            serde_json::from_str("{\"result\": \"item-1\"}").unwrap();
        assert_eq!(parsed.result.as_deref(), Some("item-1"));
    }

    #[test]
    fn test_mutate_response_decodes_ids() {
        let parsed: MutateResponse = serde_json::from_str(
            "{\"transactionId\": \"t1\", \"results\": [{\"id\": \"item-9\", \"operation\": \"create\"}]}",
        )
        .unwrap();
        assert_eq!(parsed.results[0].id, "item-9");
    }
}
