use std::time::Duration;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use rxscribe::application::ports::{
    ChatMessage, CompletionRequest, LlmClient, LlmClientError,
};
use rxscribe::infrastructure::llm::OpenAiClient;

async fn start_mock_completion_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                response_body,
            )
                .into_response()
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

fn client_for(base_url: String) -> OpenAiClient {
    OpenAiClient::new(
        "sk-test".to_string(),
        Some(base_url),
        "gpt-4".to_string(),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn request() -> CompletionRequest {
    CompletionRequest {
        messages: vec![
            ChatMessage::system("Return JSON only."),
            ChatMessage::user("fever and cough"),
        ],
        max_tokens: 500,
        temperature: 0.1,
    }
}

#[tokio::test]
async fn given_successful_completion_when_completing_then_returns_first_choice_content() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"Prescriptions\":[]}"}}]}"#;
    let (base_url, shutdown_tx) = start_mock_completion_server(200, body).await;

    let result = client_for(base_url).complete(&request()).await;

    assert_eq!(result.unwrap(), r#"{"Prescriptions":[]}"#);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limited_upstream_when_completing_then_returns_rate_limited() {
    let (base_url, shutdown_tx) =
        start_mock_completion_server(429, r#"{"error":{"message":"slow down"}}"#).await;

    let result = client_for(base_url).complete(&request()).await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_completing_then_returns_api_error() {
    let (base_url, shutdown_tx) =
        start_mock_completion_server(500, r#"{"error":{"message":"boom"}}"#).await;

    let result = client_for(base_url).complete(&request()).await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_choices_when_completing_then_returns_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_completion_server(200, r#"{"choices":[]}"#).await;

    let result = client_for(base_url).complete(&request()).await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_upstream_when_completing_then_returns_api_error() {
    let client = client_for("http://127.0.0.1:1/v1".to_string());

    let result = client.complete(&request()).await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}
