//! Archiver: durable copy of a source file into object storage.
//!
//! The source body is streamed straight from the fetch response into the
//! storage backend; the whole file is never buffered in memory.

use std::sync::Arc;
use std::time::Duration;

use futures::{StreamExt, TryStreamExt};
use pressroom_core::IntakeError;
use pressroom_storage::Storage;
use tokio_util::io::StreamReader;

const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// The durable copy of a submission's source file.
#[derive(Debug, Clone)]
pub struct ArchivedDocument {
    pub storage_key: String,
    pub public_url: String,
    /// Content type reported by the source, when it reported one
    pub content_type: Option<String>,
}

/// Copies a fetchable source file into long-term object storage.
pub struct Archiver {
    http: reqwest::Client,
    storage: Arc<dyn Storage>,
}

impl Archiver {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { http, storage }
    }

    /// Fetch `source_url` and stream it into storage under `storage_key`.
    ///
    /// Fails with `Fetch` when the source is unreachable or returns a
    /// non-success status, and with `Storage` when the durable write fails.
    pub async fn archive(
        &self,
        source_url: &str,
        storage_key: &str,
    ) -> Result<ArchivedDocument, IntakeError> {
        if !source_url.starts_with("http://") && !source_url.starts_with("https://") {
            return Err(IntakeError::Fetch(format!(
                "unsupported URL scheme: {}",
                source_url
            )));
        }

        let start = std::time::Instant::now();
        let response = self
            .http
            .get(source_url)
            .send()
            .await
            .map_err(|e| IntakeError::Fetch(format!("failed to fetch {}: {}", source_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::Fetch(format!(
                "source returned {} for {}",
                status, source_url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let stream = response
            .bytes_stream()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            .boxed();
        let reader = StreamReader::new(stream);

        let public_url = self
            .storage
            .upload_stream(
                storage_key,
                content_type.as_deref().unwrap_or("application/pdf"),
                Box::pin(reader),
            )
            .await
            .map_err(|e| IntakeError::Storage(e.to_string()))?;

        tracing::info!(
            source_url = %source_url,
            key = %storage_key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Source document archived"
        );

        Ok(ArchivedDocument {
            storage_key: storage_key.to_string(),
            public_url,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_storage::LocalStorage;

    async fn local_storage() -> (tempfile::TempDir, Arc<dyn Storage>) {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = LocalStorage::new(dir.path(), "http://localhost:3000/archive".to_string())
            .await
            .expect("local storage");
        (dir, Arc::new(storage))
    }

    #[tokio::test]
    async fn test_unreachable_source_is_fetch_error() {
        let (_dir, storage) = local_storage().await;
        let archiver = Archiver::new(storage);

        let err = archiver
            .archive("http://127.0.0.1:9/press.pdf", "uploads/api/1-0.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_non_http_scheme_is_fetch_error() {
        let (_dir, storage) = local_storage().await;
        let archiver = Archiver::new(storage);

        let err = archiver
            .archive("ftp://example.com/press.pdf", "uploads/api/1-0.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::Fetch(_)));
    }
}
