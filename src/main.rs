use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use rxscribe::application::services::{
    ArchiveService, PrescriptionGenerator, PrescriptionService, PromptConfig,
};
use rxscribe::infrastructure::audio::OpenAiWhisperEngine;
use rxscribe::infrastructure::llm::OpenAiClient;
use rxscribe::infrastructure::observability::{TracingConfig, init_tracing};
use rxscribe::infrastructure::persistence::{JsonFilePrescriptionRepository, resolve_dataset_path};
use rxscribe::infrastructure::storage::LocalStagingStore;
use rxscribe::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::new(
            environment.as_str(),
            settings.logging.level.clone(),
            settings.logging.enable_json,
        ),
        settings.server.port,
    );

    if settings.llm.api_key.is_empty() {
        tracing::warn!("No LLM API key configured; every generation will fall back");
    }

    let upstream_timeout = settings.upstream.timeout();

    let llm_client = Arc::new(OpenAiClient::new(
        settings.llm.api_key.clone(),
        settings.llm.base_url.clone(),
        settings.llm.chat_model.clone(),
        upstream_timeout,
    )?);

    let transcription_engine = Arc::new(OpenAiWhisperEngine::new(
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
        Some(settings.transcription.model.clone()),
        upstream_timeout,
    )?);

    let staging_store = Arc::new(
        LocalStagingStore::new(PathBuf::from(&settings.storage.staging_path))
            .context("Failed to prepare audio staging directory")?,
    );

    let generator = PrescriptionGenerator::new(
        llm_client,
        PromptConfig {
            max_tokens: settings.llm.max_tokens,
            temperature: settings.llm.temperature,
            ..PromptConfig::default()
        },
    );

    let prescription_service = Arc::new(PrescriptionService::new(
        generator,
        transcription_engine,
        staging_store,
        upstream_timeout,
    ));

    let dataset_path = resolve_dataset_path(
        settings.storage.dataset_path.as_deref(),
        settings.storage.deployed,
    );
    tracing::info!(path = %dataset_path.display(), "Prescription archive location");
    let archive_service = Arc::new(ArchiveService::new(Arc::new(
        JsonFilePrescriptionRepository::new(dataset_path),
    )));

    let state = AppState {
        prescription_service,
        archive_service,
        upload_limit_bytes: settings.server.max_upload_mb * 1024 * 1024,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
