use async_trait::async_trait;

use crate::domain::PersistedEntry;

use super::RepositoryError;

/// Append-only archive of accepted prescriptions.
#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    async fn append(&self, entry: &PersistedEntry) -> Result<(), RepositoryError>;

    async fn list(&self) -> Result<Vec<PersistedEntry>, RepositoryError>;
}
