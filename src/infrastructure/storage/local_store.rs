use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Audio staging on the local filesystem, rooted at `base_path`.
pub struct LocalStagingStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

fn not_found_or(
    e: object_store::Error,
    other: fn(String) -> StagingStoreError,
) -> StagingStoreError {
    match e {
        object_store::Error::NotFound { .. } => StagingStoreError::NotFound(e.to_string()),
        _ => other(e.to_string()),
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(&self, path: &StoragePath, data: Bytes) -> Result<u64, StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        let size = data.len() as u64;

        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        Ok(size)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| not_found_or(e, StagingStoreError::DownloadFailed))?;

        result
            .bytes()
            .await
            .map_err(|e| StagingStoreError::DownloadFailed(e.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| not_found_or(e, StagingStoreError::DeleteFailed))
    }
}
