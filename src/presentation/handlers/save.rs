use axum::Json;
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::LlmClient;
use crate::application::services::SaveError;
use crate::presentation::state::AppState;

use super::ErrorResponse;

const PRESCRIPTION_FIELD: &str = "prescription";

#[derive(Debug, Deserialize)]
pub struct SaveForm {
    /// JSON document of the form `{"prescription": ...}`.
    #[serde(default)]
    pub prescription: Option<String>,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub message: String,
}

/// Accepts the `prescription` field from either a urlencoded or a multipart form.
#[tracing::instrument(skip(state, request))]
pub async fn save_prescription_handler<L>(
    State(state): State<AppState<L>>,
    request: Request,
) -> Response
where
    L: LlmClient + 'static,
{
    let raw = match read_prescription_field(request).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            return ErrorResponse::new(SaveError::MissingPrescription.to_string())
                .into_response_with(StatusCode::BAD_REQUEST);
        }
        Err(rejection) => return rejection,
    };

    let payload: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "Save request with malformed JSON");
            return ErrorResponse::new("Invalid JSON format")
                .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    match state.archive_service.save(payload).await {
        Ok(_) => (
            StatusCode::OK,
            Json(SaveResponse {
                message: "Prescription saved successfully".to_string(),
            }),
        )
            .into_response(),
        Err(SaveError::MissingPrescription) => {
            tracing::warn!("Save request without prescription key");
            ErrorResponse::new(SaveError::MissingPrescription.to_string())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        Err(SaveError::Repository(e)) => ErrorResponse::new("Failed to save prescription")
            .with_details(e.to_string())
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn read_prescription_field(request: Request) -> Result<Option<String>, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if !is_multipart {
        let Form(form) = Form::<SaveForm>::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return Ok(form.prescription);
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(PRESCRIPTION_FIELD) => {
                return field.text().await.map(Some).map_err(|e| {
                    tracing::warn!(error = %e, "Failed to read prescription field");
                    ErrorResponse::new("Failed to read multipart")
                        .with_details(e.to_string())
                        .into_response_with(StatusCode::BAD_REQUEST)
                });
            }
            Ok(Some(_)) => continue,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(ErrorResponse::new("Failed to read multipart")
                    .with_details(e.to_string())
                    .into_response_with(StatusCode::BAD_REQUEST));
            }
        }
    }
}
