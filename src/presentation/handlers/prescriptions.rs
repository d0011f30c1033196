use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

use super::ErrorResponse;

pub async fn list_prescriptions_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    match state.archive_service.list().await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read prescription archive");
            ErrorResponse::new("Failed to read prescriptions")
                .with_details(e.to_string())
                .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
