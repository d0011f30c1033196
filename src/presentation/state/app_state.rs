use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::{ArchiveService, PrescriptionService};

pub struct AppState<L>
where
    L: LlmClient,
{
    pub prescription_service: Arc<PrescriptionService<L>>,
    pub archive_service: Arc<ArchiveService>,
    pub upload_limit_bytes: usize,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            prescription_service: Arc::clone(&self.prescription_service),
            archive_service: Arc::clone(&self.archive_service),
            upload_limit_bytes: self.upload_limit_bytes,
        }
    }
}
