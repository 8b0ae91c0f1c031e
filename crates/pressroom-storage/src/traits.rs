//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, so the archiver can work with any backend without coupling to
//! implementation details.

use async_trait::async_trait;
use pressroom_core::StorageBackendKind;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Keys are caller-generated (see [`crate::keys::archive_key`]) and passed in
/// verbatim; backends never invent key structure.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a buffer to the given key. Returns the public URL.
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Upload from an async reader without buffering the whole body in
    /// memory. Returns the public URL.
    ///
    /// Required for large attachments: the reader is consumed in bounded
    /// chunks and written through as it arrives.
    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<String>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete a file by its storage key
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Publicly resolvable locator for a stored object
    fn public_url(&self, storage_key: &str) -> String;

    /// Backend-native URI (e.g. `gs://bucket/key`), consumed by the remote
    /// document-understanding backend
    fn storage_uri(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackendKind;
}
