use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub storage: StorageSettings,
    pub upstream: UpstreamSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub chat_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub staging_path: String,
    pub dataset_path: Option<String>,
    /// Set on the hosted deployment (`RENDER` env var); moves the archive to `/data`.
    pub deployed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    pub timeout_seconds: u64,
}

impl UpstreamSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers defaults, `appsettings.<env>.toml` and `APP__SECTION__KEY` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let openai_api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(port))?
            .set_default("server.max_upload_mb", 25_i64)?
            .set_default("llm.api_key", openai_api_key.clone())?
            .set_default("llm.chat_model", "gpt-4")?
            .set_default("llm.max_tokens", 500_i64)?
            .set_default("llm.temperature", 0.1_f64)?
            .set_default("transcription.api_key", openai_api_key)?
            .set_default("transcription.model", "whisper-1")?
            .set_default("storage.staging_path", "tmp/audio")?
            .set_default("storage.deployed", std::env::var("RENDER").is_ok())?
            .set_default("upstream.timeout_seconds", 60_i64)?
            .set_default("logging.level", "info")?
            .set_default(
                "logging.enable_json",
                std::env::var("LOG_FORMAT")
                    .map(|v| v.eq_ignore_ascii_case("json"))
                    .unwrap_or(false),
            )?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
