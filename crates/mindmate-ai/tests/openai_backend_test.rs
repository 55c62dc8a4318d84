//! HTTP-level tests for the OpenAI-compatible backend against a wiremock
//! server. No real network access.

use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mindmate_ai::OpenAiBackend;
use mindmate_core::{AiBackend, Error};

fn backend_for(server: &MockServer) -> OpenAiBackend {
    OpenAiBackend::with_config(
        server.uri(),
        "test-key".to_string(),
        "gpt-4o".to_string(),
        5,
    )
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_summarize_sends_model_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(bearer_token("test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "max_tokens": 500
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("A summary.")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let text = backend
        .summarize("Mitochondria are organelles.", Some("Cells"))
        .await
        .unwrap();

    assert_eq!(text, "A summary.");
}

#[tokio::test]
async fn test_chat_uses_chat_token_budget() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({ "max_tokens": 800 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hi there.")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let text = backend.chat("Hello", None).await.unwrap();
    assert_eq!(text, "Hi there.");
}

#[tokio::test]
async fn test_upstream_error_maps_to_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.summarize("content", None).await.unwrap_err();

    match err {
        Error::Generation(msg) => assert!(msg.contains("500")),
        other => panic!("Expected Generation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_choices_maps_to_generation_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.quiz("content", None).await.unwrap_err();
    assert!(matches!(err, Error::Generation(_)));
}
