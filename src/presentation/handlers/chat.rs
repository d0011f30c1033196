use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[tracing::instrument(skip(state, request))]
pub async fn chat_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    match state
        .prescription_service
        .handle_text(request.text.as_deref())
        .await
    {
        Ok(batch) => {
            tracing::info!(prescriptions = batch.prescriptions.len(), "Chat request served");
            (StatusCode::OK, Json(batch)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Chat request rejected");
            ErrorResponse::new(e.to_string()).into_response_with(StatusCode::BAD_REQUEST)
        }
    }
}
