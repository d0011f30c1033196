use std::io;

use bytes::Bytes;

use crate::domain::StoragePath;

/// Short-lived storage for uploaded audio, one object per request.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<u64, StagingStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
