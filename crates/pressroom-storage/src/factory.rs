use crate::{GcsStorage, LocalStorage, Storage, StorageError, StorageResult};
use pressroom_core::{Config, StorageBackendKind};
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackendKind::Gcs => {
            let bucket = config.gcs_bucket.clone().ok_or_else(|| {
                StorageError::ConfigError("GCS_BUCKET_NAME not configured".to_string())
            })?;

            let storage = GcsStorage::new(bucket)?;
            Ok(Arc::new(storage))
        }

        StorageBackendKind::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }
    }
}
