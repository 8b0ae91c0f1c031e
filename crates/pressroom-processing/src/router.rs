//! Extraction strategy routing.

use std::sync::Arc;

use async_trait::async_trait;
use pressroom_storage::Storage;

use crate::kind::DocumentKind;
use crate::{office, DocAiClient, ExtractionError};

/// Remote document-understanding backend seam. Implemented by
/// [`DocAiClient`] in production and by in-memory fakes in tests.
#[async_trait]
pub trait DocumentUnderstanding: Send + Sync {
    /// Process a stored document (by backend-native URI) and return its
    /// extracted text.
    async fn process(&self, storage_uri: &str, mime_type: &str)
        -> Result<String, ExtractionError>;
}

#[async_trait]
impl DocumentUnderstanding for DocAiClient {
    async fn process(
        &self,
        storage_uri: &str,
        mime_type: &str,
    ) -> Result<String, ExtractionError> {
        DocAiClient::process(self, storage_uri, mime_type).await
    }
}

/// Routes an archived document to the extraction strategy for its kind.
///
/// Word-processing documents are converted locally and never touch the
/// remote backend; PDFs and unknown formats go to the remote backend and
/// never touch the local converter.
pub struct ExtractorRouter {
    remote: Option<Arc<dyn DocumentUnderstanding>>,
}

impl ExtractorRouter {
    pub fn new(remote: Option<Arc<dyn DocumentUnderstanding>>) -> Self {
        Self { remote }
    }

    pub async fn extract(
        &self,
        storage: &dyn Storage,
        storage_key: &str,
        kind: DocumentKind,
    ) -> Result<String, ExtractionError> {
        match kind {
            DocumentKind::WordProcessing => {
                tracing::debug!(key = %storage_key, "Extracting locally (word-processing)");
                let bytes = storage
                    .download(storage_key)
                    .await
                    .map_err(|e| ExtractionError::Fetch(e.to_string()))?;
                office::extract_docx_text(&bytes)
            }
            DocumentKind::Pdf | DocumentKind::Unknown => {
                let remote = self.remote.as_ref().ok_or_else(|| {
                    ExtractionError::Backend(
                        "document-understanding backend not configured".to_string(),
                    )
                })?;
                let uri = storage.storage_uri(storage_key);
                tracing::debug!(key = %storage_key, uri = %uri, "Extracting via remote backend");
                remote.process(&uri, kind.mime_type()).await
            }
        }
    }
}
