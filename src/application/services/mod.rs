mod archive_service;
mod fallback;
mod prescription_generator;
mod prescription_service;
mod response_normalizer;
mod schema_validator;

pub use archive_service::{ArchiveService, SaveError};
pub use fallback::{FALLBACK_NOTICE, default_response};
pub use prescription_generator::{
    DEFAULT_SYSTEM_INSTRUCTION, PROMPT_MISSING_SENTINEL, PrescriptionGenerator, PromptConfig,
};
pub use prescription_service::{
    AudioFailure, AudioPrescription, AudioProcessingError, AudioUpload, PrescriptionService,
    StructuringError, TextInputError,
};
pub use response_normalizer::{NormalizeError, normalize_response, quote_bare_ranges};
pub use schema_validator::{ValidationError, validate_prescriptions};
