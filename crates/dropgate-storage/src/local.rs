use crate::traits::{ObjectMetadata, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use dropgate_core::StorageBackend;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Intended for development and tests. HTTP metadata has no filesystem
/// counterpart, so it is accepted and logged but not persisted; whatever
/// serves the directory decides the response headers.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance rooted at `base_path`.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert an object key to a filesystem path.
    ///
    /// Generated keys are single URL-safe path segments, but the key still
    /// gets validated so a hand-crafted one cannot escape the base directory.
    fn key_to_path(&self, object_key: &str) -> StorageResult<PathBuf> {
        if object_key.is_empty()
            || object_key.contains("..")
            || object_key.contains('/')
            || object_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(object_key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        object_key: &str,
        data: Bytes,
        metadata: &ObjectMetadata,
    ) -> StorageResult<()> {
        let path = self.key_to_path(object_key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path.display(),
                "Local storage create failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;
        file.write_all(&data).await.map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path.display(),
                "Local storage write failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;
        file.flush()
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;

        tracing::info!(
            key = %object_key,
            size_bytes = size,
            cache_control = %metadata.cache_control,
            content_disposition = ?metadata.content_disposition,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
