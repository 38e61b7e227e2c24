//! GeminiBackend against a local stand-in for the generateContent endpoint.

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use finsight_llm::backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, Message};
use finsight_llm::commentary::{request_commentary, Commentary, CommentaryFailure, GenerationSettings};
use secrecy::SecretString;
use serde_json::{json, Value};

const GOOD_KEY: &str = "good-key";

async fn generate(
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()).unwrap_or("");
    if key != GOOD_KEY {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }})),
        );
    }
    if !model_action.ends_with(":generateContent") {
        return (StatusCode::NOT_FOUND, Json(json!({"error": {"message": "no such method"}})));
    }
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or("").to_string();
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{"content": {"parts": [{"text": "Echo: "}, {"text": prompt}]}}],
            "usageMetadata": {"promptTokenCount": 7, "candidatesTokenCount": 3}
        })),
    )
}

async fn spawn_server() -> String {
    let app = Router::new().route("/v1beta/models/{model_action}", post(generate));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn backend(base: &str, key: &str) -> GeminiBackend {
    GeminiBackend::new(SecretString::from(key.to_string()), "gemini-1.5-flash").with_base_url(base)
}

#[tokio::test]
async fn test_generate_content_joins_parts() {
    let base = spawn_server().await;
    let resp = backend(&base, GOOD_KEY)
        .complete(LlmRequest {
            messages: vec![Message::user("hello")],
            model: None,
            max_tokens: Some(64),
            temperature: None,
        })
        .await
        .unwrap();
    assert_eq!(resp.content, "Echo: hello");
    assert_eq!(resp.prompt_tokens, 7);
    assert_eq!(resp.completion_tokens, 3);
}

#[tokio::test]
async fn test_bad_key_maps_to_invalid_credential() {
    let base = spawn_server().await;
    let b = backend(&base, "wrong");
    let err = b
        .complete(LlmRequest { messages: vec![Message::user("x")], model: None, max_tokens: None, temperature: None })
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::ApiError { status: 400, .. }));
    assert!(err.is_invalid_credential());

    let c = request_commentary(&b, "x".into(), GenerationSettings::default()).await;
    assert_eq!(c, Commentary::Failed(CommentaryFailure::InvalidCredential));
}

#[tokio::test]
async fn test_unreachable_host_is_other_failure() {
    // Port 9 (discard) on loopback is not expected to accept HTTP.
    let b = backend("http://127.0.0.1:9", GOOD_KEY);
    let c = request_commentary(&b, "x".into(), GenerationSettings::default()).await;
    assert!(matches!(c, Commentary::Failed(CommentaryFailure::Other(_))));
}
