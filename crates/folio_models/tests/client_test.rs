//! Driver tests against a local fake chat completions endpoint.

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use folio_core::{FinishReason, GenerateRequest};
use folio_error::{FolioErrorKind, ProviderErrorKind};
use folio_interface::CompletionDriver;
use folio_models::{ClientConfig, OpenAICompatibleClient};
use serde_json::{Value, json};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1", addr)
}

async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 0,
            "model": body["model"],
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": format!("{}|{}|{}", auth, prompt, body["max_tokens"]),
                },
                "finish_reason": "length"
            }]
        })),
    )
}

#[tokio::test]
async fn test_generate_posts_prompt_with_bearer_key() {
    let base_url = spawn(Router::new().route("/v1/chat/completions", post(echo_completion))).await;
    let mut config = ClientConfig::new(base_url, "test-model").with_api_key("sk-test");
    config.max_tokens = Some(256);
    let client = OpenAICompatibleClient::new(config);

    let response = client
        .generate(&GenerateRequest::from_prompt("Topic: mars"))
        .await
        .unwrap();

    assert_eq!(response.text, "Bearer sk-test|Topic: mars|256");
    assert_eq!(response.finish_reason, Some(FinishReason::Length));
    assert_eq!(client.model_name(), "test-model");
}

#[tokio::test]
async fn test_error_status_maps_to_api_error() {
    let router = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let base_url = spawn(router).await;
    let client = OpenAICompatibleClient::new(ClientConfig::new(base_url, "m"));

    let err = client
        .generate(&GenerateRequest::from_prompt("x"))
        .await
        .unwrap_err();
    match err.kind() {
        FolioErrorKind::Provider(e) => assert_eq!(
            e.kind,
            ProviderErrorKind::Api {
                status: 429,
                message: "rate limited".to_string()
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unparseable_body_is_deserialization_error() {
    let router = Router::new().route("/v1/chat/completions", post(|| async { "not json" }));
    let base_url = spawn(router).await;
    let client = OpenAICompatibleClient::new(ClientConfig::new(base_url, "m"));

    let err = client
        .generate(&GenerateRequest::from_prompt("x"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        FolioErrorKind::Provider(e) if matches!(e.kind, ProviderErrorKind::Deserialization(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    let client = OpenAICompatibleClient::new(ClientConfig::new("http://127.0.0.1:9/v1", "m"));

    let err = client
        .generate(&GenerateRequest::from_prompt("x"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        FolioErrorKind::Provider(e) if matches!(e.kind, ProviderErrorKind::Http(_))
    ));
}
