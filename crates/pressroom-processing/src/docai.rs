//! Remote document-understanding backend client.
//!
//! Synchronous `:process` call against a regional endpoint, referencing the
//! archived file by storage URI. The processor identity and region come from
//! configuration; access-token minting is owned by the deployment
//! environment, not this client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ExtractionError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest {
    gcs_document: GcsDocument,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsDocument {
    gcs_uri: String,
    mime_type: String,
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    document: Option<ProcessedDocument>,
}

#[derive(Debug, Deserialize)]
struct ProcessedDocument {
    #[serde(default)]
    text: String,
}

/// Client for the remote document-understanding backend.
pub struct DocAiClient {
    http: reqwest::Client,
    endpoint: String,
    processor_name: String,
    access_token: String,
}

impl DocAiClient {
    /// Create a client for the given processor.
    ///
    /// # Arguments
    /// * `processor_name` - full resource name
    ///   (`projects/{project}/locations/{location}/processors/{id}`)
    /// * `location` - geographic region, used to pick the regional endpoint
    /// * `access_token` - bearer token for the backend
    /// * `endpoint_override` - replaces the regional endpoint (tests, emulators)
    pub fn new(
        processor_name: String,
        location: &str,
        access_token: String,
        endpoint_override: Option<String>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let endpoint = endpoint_override
            .unwrap_or_else(|| format!("https://{}-documentai.googleapis.com", location));

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            processor_name,
            access_token,
        })
    }

    /// Process a stored document and return its full extracted text.
    pub async fn process(
        &self,
        storage_uri: &str,
        mime_type: &str,
    ) -> Result<String, ExtractionError> {
        let url = format!("{}/v1/{}:process", self.endpoint, self.processor_name);
        let request = ProcessRequest {
            gcs_document: GcsDocument {
                gcs_uri: storage_uri.to_string(),
                mime_type: mime_type.to_string(),
            },
        };

        tracing::debug!(
            processor = %self.processor_name,
            storage_uri = %storage_uri,
            "Sending document-understanding request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Backend(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Backend(format!(
                "backend returned {}: {}",
                status, body
            )));
        }

        let parsed: ProcessResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Backend(format!("unreadable response: {}", e)))?;

        let text = parsed.document.map(|d| d.text).unwrap_or_default();
        tracing::info!(
            storage_uri = %storage_uri,
            text_length = text.len(),
            "Document-understanding extraction complete"
        );

        Ok(text)
    }
}
