use std::sync::Arc;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::application::ports::{PrescriptionRepository, RepositoryError};
use crate::domain::PersistedEntry;

const PRESCRIPTION_KEY: &str = "prescription";

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("No prescription data provided")]
    MissingPrescription,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

/// Archives accepted prescriptions one at a time.
pub struct ArchiveService {
    repository: Arc<dyn PrescriptionRepository>,
    last_saved_at: Mutex<Option<DateTime<Utc>>>,
}

impl ArchiveService {
    pub fn new(repository: Arc<dyn PrescriptionRepository>) -> Self {
        Self {
            repository,
            last_saved_at: Mutex::new(None),
        }
    }

    /// Appends `payload["prescription"]` to the archive.
    ///
    /// Saves are serialized, so entries land in timestamp order. Timestamps are
    /// strictly increasing at microsecond resolution even if the wall clock is not.
    #[tracing::instrument(skip(self, payload))]
    pub async fn save(&self, payload: Value) -> Result<PersistedEntry, SaveError> {
        let prescription = match payload {
            Value::Object(mut map) => map
                .remove(PRESCRIPTION_KEY)
                .ok_or(SaveError::MissingPrescription)?,
            _ => return Err(SaveError::MissingPrescription),
        };

        let mut last_saved_at = self.last_saved_at.lock().await;
        let now = Utc::now().trunc_subsecs(6);
        let saved_at = match *last_saved_at {
            Some(previous) if previous >= now => previous + Duration::microseconds(1),
            _ => now,
        };

        let entry = PersistedEntry::new(prescription, saved_at);
        self.repository.append(&entry).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save prescription");
            e
        })?;
        *last_saved_at = Some(saved_at);

        tracing::info!(timestamp = %entry.timestamp, "Prescription saved");
        Ok(entry)
    }

    pub async fn list(&self) -> Result<Vec<PersistedEntry>, RepositoryError> {
        self.repository.list().await
    }
}
