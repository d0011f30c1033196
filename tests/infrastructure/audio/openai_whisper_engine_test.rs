use std::time::Duration;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use rxscribe::application::ports::{TranscriptionEngine, TranscriptionError};
use rxscribe::infrastructure::audio::OpenAiWhisperEngine;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn engine_for(base_url: String) -> OpenAiWhisperEngine {
    OpenAiWhisperEngine::new(
        "sk-test".to_string(),
        Some(base_url),
        None,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn given_valid_audio_when_transcribing_then_returns_trimmed_text() {
    let (base_url, shutdown_tx) =
        start_mock_whisper_server(200, "  Paracetamol 500 mg twice daily\n").await;

    let result = engine_for(base_url)
        .transcribe(b"fake audio bytes", "recording.wav")
        .await;

    assert_eq!(result.unwrap(), "Paracetamol 500 mg twice daily");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) =
        start_mock_whisper_server(400, r#"{"error":{"message":"bad audio"}}"#).await;

    let result = engine_for(base_url)
        .transcribe(b"bad audio", "recording.mp3")
        .await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unknown_extension_when_transcribing_then_rejects_before_upload() {
    let engine = engine_for("http://127.0.0.1:1/v1".to_string());

    let result = engine.transcribe(b"data", "notes.txt").await;

    assert!(matches!(result, Err(TranscriptionError::UnsupportedFormat(ext)) if ext == "txt"));
}
