use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::LlmClient;
use crate::application::services::{AudioFailure, AudioUpload};
use crate::presentation::state::AppState;

use super::ErrorResponse;

const AUDIO_FIELD: &str = "audio";

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_stream_handler<L>(
    State(state): State<AppState<L>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let upload = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(AUDIO_FIELD) => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                match field.bytes().await {
                    Ok(data) => {
                        tracing::debug!(
                            bytes = data.len(),
                            file_name = ?file_name,
                            content_type = ?content_type,
                            "Audio upload received"
                        );
                        break AudioUpload { data, file_name };
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio bytes");
                        return ErrorResponse::new("Failed to read audio upload")
                            .with_details(e.to_string())
                            .into_response_with(StatusCode::BAD_REQUEST);
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Transcription request without audio field");
                return ErrorResponse::new("No audio provided")
                    .into_response_with(StatusCode::BAD_REQUEST);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return ErrorResponse::new("Failed to read multipart")
                    .with_details(e.to_string())
                    .into_response_with(StatusCode::BAD_REQUEST);
            }
        }
    };

    match state.prescription_service.handle_audio(upload).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => match e.cause {
            AudioFailure::EmptyAudio => ErrorResponse::new("No audio provided")
                .with_logs(e.logs)
                .into_response_with(StatusCode::BAD_REQUEST),
            cause => ErrorResponse::new("Audio processing failed")
                .with_details(cause.to_string())
                .with_logs(e.logs)
                .into_response_with(StatusCode::BAD_REQUEST),
        },
    }
}
