use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStore, ObjectStoreExt, PutPayload, Result as ObjectResult, WriteMultipart};
use pressroom_core::StorageBackendKind;
use std::pin::Pin;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read chunk size for streaming uploads.
const STREAM_CHUNK_BYTES: usize = 64 * 1024;

/// Upper bound on in-flight multipart parts during a streaming upload.
const MAX_INFLIGHT_PARTS: usize = 4;

/// Google Cloud Storage implementation
#[derive(Clone)]
pub struct GcsStorage {
    store: GoogleCloudStorage,
    bucket: String,
}

impl GcsStorage {
    /// Create a new GcsStorage instance.
    ///
    /// Credentials are resolved from the environment
    /// (`GOOGLE_SERVICE_ACCOUNT` / application default credentials), the way
    /// the object_store builder does it.
    pub fn new(bucket: String) -> StorageResult<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(GcsStorage { store, bucket })
    }
}

#[async_trait]
impl Storage for GcsStorage {
    async fn upload(
        &self,
        storage_key: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.put(&location, PutPayload::from(bytes)).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn upload_stream(
        &self,
        storage_key: &str,
        _content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<String> {
        let location = Path::from(storage_key.to_string());
        let start = std::time::Instant::now();

        // Multipart upload keeps memory bounded: chunks are written through
        // as they arrive, with a cap on in-flight parts.
        let upload = self
            .store
            .put_multipart(&location)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let mut write = WriteMultipart::new(upload);

        let mut total: u64 = 0;
        let mut buf = vec![0u8; STREAM_CHUNK_BYTES];
        loop {
            let bytes_read = reader.read(&mut buf).await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to read from stream: {}", e))
            })?;
            if bytes_read == 0 {
                break;
            }
            total += bytes_read as u64;
            write.write(&buf[..bytes_read]);
            write
                .wait_for_capacity(MAX_INFLIGHT_PARTS)
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        }

        write.finish().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = total,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS stream upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = total,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS stream upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(storage_key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %storage_key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let location = Path::from(storage_key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;
        result.map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        tracing::info!(bucket = %self.bucket, key = %storage_key, "GCS delete successful");
        Ok(())
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!(
            "https://storage.googleapis.com/{}/{}",
            self.bucket, storage_key
        )
    }

    fn storage_uri(&self, storage_key: &str) -> String {
        format!("gs://{}/{}", self.bucket, storage_key)
    }

    fn backend_type(&self) -> StorageBackendKind {
        StorageBackendKind::Gcs
    }
}
