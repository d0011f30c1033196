use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{PrescriptionRepository, RepositoryError};
use crate::domain::PersistedEntry;

const DEPLOYED_DATASET_PATH: &str = "/data/prescriptions_dataset.json";
const LOCAL_DATASET_PATH: &str = "prescriptions_dataset.json";

/// Picks the archive location: explicit setting first, then the deployment
/// volume when `deployed` is set, else the working directory.
pub fn resolve_dataset_path(configured: Option<&str>, deployed: bool) -> PathBuf {
    match configured.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => PathBuf::from(path),
        None if deployed => PathBuf::from(DEPLOYED_DATASET_PATH),
        None => PathBuf::from(LOCAL_DATASET_PATH),
    }
}

/// Archive kept as a single pretty-printed JSON array on disk.
///
/// Every append rewrites the whole file through a temp file and a rename,
/// holding `write_lock` so concurrent saves cannot drop each other's entries.
pub struct JsonFilePrescriptionRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFilePrescriptionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Vec<PersistedEntry>, RepositoryError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::ReadFailed(e.to_string())),
        };

        match serde_json::from_slice(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Archive file is unreadable, starting from an empty collection"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write_entries(&self, entries: &[PersistedEntry]) -> Result<(), RepositoryError> {
        let serialized = serde_json::to_vec_pretty(entries)
            .map_err(|e| RepositoryError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::WriteFailed(e.to_string()))?;
        }

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, serialized)
            .await
            .map_err(|e| RepositoryError::WriteFailed(e.to_string()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| RepositoryError::WriteFailed(e.to_string()))
    }
}

#[async_trait]
impl PrescriptionRepository for JsonFilePrescriptionRepository {
    #[tracing::instrument(skip(self, entry), fields(path = %self.path.display()))]
    async fn append(&self, entry: &PersistedEntry) -> Result<(), RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.push(entry.clone());
        self.write_entries(&entries).await?;

        tracing::debug!(total = entries.len(), "Archive rewritten");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<PersistedEntry>, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        self.read_entries().await
    }
}
