use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use summarize_service::{LlmClient, SummarizeError, Summarizer};

/// Canned Responses API stub; replays queued replies in order.
#[derive(Clone, Default)]
struct Stub {
    replies: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl Stub {
    fn with_replies(replies: Vec<(StatusCode, Value)>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn responses(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.requests.lock().unwrap().push((headers, body));
    let (status, reply) = stub
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "no reply queued" })));
    (status, Json(reply))
}

async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new()
        .route("/v1/responses", post(responses))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1/")
}

fn client(base_url: &str, max_retries: usize) -> LlmClient {
    LlmClient::new(
        "sk-test".to_string(),
        Some("org-test".to_string()),
        "gpt-test".to_string(),
    )
    .unwrap()
    .with_base_url(base_url)
    .with_max_retries(max_retries)
}

const TEXT: &str = "The committee met for three hours and agreed to fund the new library wing.";

#[tokio::test]
async fn test_summarize_sends_responses_request() {
    let stub = Stub::with_replies(vec![(
        StatusCode::OK,
        json!({ "output_text": "Library wing funded." }),
    )]);
    let base_url = spawn_stub(stub.clone()).await;

    let summary = client(&base_url, 0).summarize(TEXT).await.unwrap();

    assert_eq!(summary, "Library wing funded.");
    assert_eq!(stub.calls(), 1);

    let requests = stub.requests.lock().unwrap();
    let (headers, body) = &requests[0];
    assert_eq!(headers["authorization"], "Bearer sk-test");
    assert_eq!(headers["openai-organization"], "org-test");
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["input"][0]["role"], "system");
    assert_eq!(body["input"][1]["role"], "user");
    assert_eq!(body["input"][1]["content"][0]["text"], TEXT);
    assert!(body["max_output_tokens"].as_u64().unwrap() >= 500);
}

#[tokio::test]
async fn test_output_parts_are_joined() {
    let stub = Stub::with_replies(vec![(
        StatusCode::OK,
        json!({
            "output": [{ "content": [
                { "type": "output_text", "text": "Line one." },
                { "type": "output_text", "text": "Line two." }
            ] }]
        }),
    )]);
    let base_url = spawn_stub(stub).await;

    let summary = client(&base_url, 0).summarize(TEXT).await.unwrap();

    assert_eq!(summary, "Line one.\nLine two.");
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let stub = Stub::with_replies(vec![
        (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": "overloaded" }),
        ),
        (StatusCode::OK, json!({ "output_text": "Recovered." })),
    ]);
    let base_url = spawn_stub(stub.clone()).await;

    let summary = client(&base_url, 2).summarize(TEXT).await.unwrap();

    assert_eq!(summary, "Recovered.");
    assert_eq!(stub.calls(), 2);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let stub = Stub::with_replies(vec![
        (
            StatusCode::BAD_REQUEST,
            json!({ "error": "invalid_request_error" }),
        ),
        (StatusCode::OK, json!({ "output_text": "unreachable" })),
    ]);
    let base_url = spawn_stub(stub.clone()).await;

    let err = client(&base_url, 3).summarize(TEXT).await.unwrap_err();

    match err {
        SummarizeError::UpstreamStatus { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("invalid_request_error"));
        }
        other => panic!("Unexpected error type: {other:?}"),
    }
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_retries_exhausted() {
    let stub = Stub::default();
    let base_url = spawn_stub(stub.clone()).await;

    let err = client(&base_url, 0).summarize(TEXT).await.unwrap_err();

    assert!(matches!(
        err,
        SummarizeError::UpstreamStatus { status: 500, .. }
    ));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_response_without_text() {
    let stub = Stub::with_replies(vec![(StatusCode::OK, json!({ "output": [] }))]);
    let base_url = spawn_stub(stub).await;

    let err = client(&base_url, 0).summarize(TEXT).await.unwrap_err();

    assert!(matches!(err, SummarizeError::OpenAIError(ref m) if m == "No text in response"));
}

#[tokio::test]
async fn test_oversized_text_never_reaches_api() {
    let stub = Stub::default();
    let base_url = spawn_stub(stub.clone()).await;
    let huge = "word ".repeat(400_000);

    let err = client(&base_url, 0).summarize(&huge).await.unwrap_err();

    assert!(matches!(err, SummarizeError::TextTooLong));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_unreachable_api_is_http_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/v1"), 0)
        .summarize(TEXT)
        .await
        .unwrap_err();

    assert!(matches!(err, SummarizeError::HttpError(_)));
}
