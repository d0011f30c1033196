mod llm_client;
mod prescription_repository;
mod repository_error;
mod staging_store;
mod transcription_engine;

pub use llm_client::{ChatMessage, ChatRole, CompletionRequest, LlmClient, LlmClientError};
pub use prescription_repository::PrescriptionRepository;
pub use repository_error::RepositoryError;
pub use staging_store::{StagingStore, StagingStoreError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
