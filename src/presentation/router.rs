use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, health_handler, list_prescriptions_handler, save_prescription_handler,
    transcribe_stream_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = DefaultBodyLimit::max(state.upload_limit_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/transcribe_stream",
            post(transcribe_stream_handler::<L>).layer(upload_limit),
        )
        .route("/chat", post(chat_handler::<L>))
        .route("/save_prescription", post(save_prescription_handler::<L>))
        .route("/prescriptions", get(list_prescriptions_handler::<L>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
