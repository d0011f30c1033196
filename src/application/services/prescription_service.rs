use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use tokio::time::timeout;

use crate::application::ports::{
    LlmClient, LlmClientError, StagingStore, StagingStoreError, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{AudioUploadId, PipelineLog, PrescriptionBatch, StoragePath};
use crate::infrastructure::observability::sanitize_prompt;

use super::fallback::default_response;
use super::prescription_generator::PrescriptionGenerator;
use super::response_normalizer::{NormalizeError, normalize_response};
use super::schema_validator::{ValidationError, validate_prescriptions};

/// Raw audio as received from the caller.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub data: Bytes,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioPrescription {
    pub response: PrescriptionBatch,
    pub transcript: String,
    pub logs: PipelineLog,
}

/// Failures on the model side of the pipeline. Always absorbed into the fallback batch.
#[derive(Debug, thiserror::Error)]
pub enum StructuringError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("completion timed out after {0:?}")]
    CompletionTimedOut(Duration),
    #[error("normalize: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
}

/// Infrastructure failures on the audio path. These reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum AudioFailure {
    #[error("no audio provided")]
    EmptyAudio,
    #[error("staging: {0}")]
    Staging(#[from] StagingStoreError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("transcription timed out after {0:?}")]
    TranscriptionTimedOut(Duration),
}

#[derive(Debug, thiserror::Error)]
#[error("audio processing failed: {cause}")]
pub struct AudioProcessingError {
    pub cause: AudioFailure,
    pub logs: PipelineLog,
}

#[derive(Debug, thiserror::Error)]
pub enum TextInputError {
    #[error("No text provided")]
    NoTextProvided,
}

pub struct PrescriptionService<L>
where
    L: LlmClient,
{
    generator: PrescriptionGenerator<L>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    staging_store: Arc<dyn StagingStore>,
    upstream_timeout: Duration,
}

impl<L> PrescriptionService<L>
where
    L: LlmClient,
{
    pub fn new(
        generator: PrescriptionGenerator<L>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        staging_store: Arc<dyn StagingStore>,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            transcription_engine,
            staging_store,
            upstream_timeout,
        }
    }

    /// Stages, transcribes and structures one audio upload.
    ///
    /// Only staging and transcription failures come back as `Err`; anything that
    /// goes wrong after the transcript exists degrades to the fallback batch.
    /// The staged object is removed on every path.
    #[tracing::instrument(skip(self, upload), fields(bytes = upload.data.len()))]
    pub async fn handle_audio(
        &self,
        upload: AudioUpload,
    ) -> Result<AudioPrescription, AudioProcessingError> {
        let mut logs = PipelineLog::new();

        if upload.data.is_empty() {
            tracing::warn!("Audio request with empty payload");
            return Err(AudioProcessingError {
                cause: AudioFailure::EmptyAudio,
                logs,
            });
        }

        let upload_id = AudioUploadId::new();
        let path = StoragePath::for_audio(&upload_id, upload.file_name.as_deref());

        let outcome = self.process_staged_audio(&path, upload.data, &mut logs).await;

        match self.staging_store.delete(&path).await {
            Ok(()) => logs.push("Temporary file removed"),
            Err(StagingStoreError::NotFound(_)) => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %path, "Failed to remove staged audio");
                logs.push(format!("Temporary file cleanup failed: {}", e));
            }
        }

        match outcome {
            Ok((response, transcript)) => Ok(AudioPrescription {
                response,
                transcript,
                logs,
            }),
            Err(cause) => {
                tracing::error!(error = %cause, "Audio processing failed");
                Err(AudioProcessingError { cause, logs })
            }
        }
    }

    /// Structures typed text. Empty input is rejected before any upstream call.
    #[tracing::instrument(skip(self, text))]
    pub async fn handle_text(
        &self,
        text: Option<&str>,
    ) -> Result<PrescriptionBatch, TextInputError> {
        let text = text
            .filter(|t| !t.is_empty())
            .ok_or(TextInputError::NoTextProvided)?;

        tracing::debug!(input = %sanitize_prompt(text), "Processing text request");

        let mut logs = PipelineLog::new();
        Ok(self.structure_or_fallback(text, &mut logs).await)
    }

    async fn process_staged_audio(
        &self,
        path: &StoragePath,
        data: Bytes,
        logs: &mut PipelineLog,
    ) -> Result<(PrescriptionBatch, String), AudioFailure> {
        let size = self.staging_store.store(path, data).await?;
        tracing::debug!(path = %path, bytes = size, "Audio staged");
        logs.push("Audio file saved temporarily");

        let audio = self.staging_store.fetch(path).await?;

        let transcript = timeout(
            self.upstream_timeout,
            self.transcription_engine.transcribe(&audio, path.file_name()),
        )
        .await
        .map_err(|_| AudioFailure::TranscriptionTimedOut(self.upstream_timeout))??;

        tracing::info!(transcript = %sanitize_prompt(&transcript), "Audio transcribed");
        logs.push(format!("Transcribed text: {}", transcript));

        let response = self.structure_or_fallback(&transcript, logs).await;
        Ok((response, transcript))
    }

    async fn structure_or_fallback(
        &self,
        text: &str,
        logs: &mut PipelineLog,
    ) -> PrescriptionBatch {
        match self.structure(text).await {
            Ok(batch) => {
                tracing::info!(
                    prescriptions = batch.prescriptions.len(),
                    "Prescription generated"
                );
                logs.push("Prescription generated successfully");
                batch
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Prescription generation failed, using default response"
                );
                logs.push("Prescription generation failed, returned default response");
                default_response()
            }
        }
    }

    async fn structure(&self, text: &str) -> Result<PrescriptionBatch, StructuringError> {
        let raw = timeout(self.upstream_timeout, self.generator.generate(text))
            .await
            .map_err(|_| StructuringError::CompletionTimedOut(self.upstream_timeout))??;

        let record = normalize_response(&raw)?;
        Ok(validate_prescriptions(record)?)
    }
}
