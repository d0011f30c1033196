mod audio_upload_id;
mod persisted_entry;
mod pipeline_log;
mod prescription;
mod storage_path;

pub use audio_upload_id::AudioUploadId;
pub use persisted_entry::PersistedEntry;
pub use pipeline_log::PipelineLog;
pub use prescription::{
    DiagnosisInformation, MEDICATION_DETAIL_FIELDS, MedicationDetails, Prescription,
    PrescriptionBatch,
};
pub use storage_path::StoragePath;
