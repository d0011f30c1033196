use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// `file_name` carries the container format (e.g. `recording.wav`) to the upstream service.
    async fn transcribe(&self, audio_data: &[u8], file_name: &str)
    -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
