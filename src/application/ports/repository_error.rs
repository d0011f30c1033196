#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("serialization failed: {0}")]
    SerializationFailed(String),
}
