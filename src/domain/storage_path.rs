use std::fmt;

use super::audio_upload_id::AudioUploadId;

const DEFAULT_AUDIO_EXTENSION: &str = "wav";

/// Key of a transient object in the audio staging store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// Builds a per-upload key so concurrent requests never share an object.
    pub fn for_audio(upload_id: &AudioUploadId, original_filename: Option<&str>) -> Self {
        let extension = original_filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_AUDIO_EXTENSION.to_string());

        Self(format!("audio/{}.{}", upload_id.as_uuid(), extension))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
