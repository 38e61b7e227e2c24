//! End-to-end request tests against the axum router with a stub LLM backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use finsight_common::Locale;
use finsight_llm::{LlmBackend, LlmError, LlmRequest, LlmResponse};
use finsight_web::{config::Config, router::build_router, state::AppState};

const BOUNDARY: &str = "finsight-test-boundary";

const BALANCE_SHEET: &str = "Item,Prior,Current\n\
    TOTAL ASSETS,100,200\n\
    SHORT-TERM ASSETS,40,120\n\
    SHORT-TERM LIABILITIES,20,60\n";

enum Reply {
    Text(&'static str),
    BadKey,
}

struct StubBackend {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LlmBackend for StubBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.prompts.lock().unwrap().push(req.messages[0].content.clone());
        match self.reply {
            Reply::Text(t) => Ok(LlmResponse {
                content: t.to_string(),
                model: "stub".into(),
                prompt_tokens: 10,
                completion_tokens: 5,
            }),
            Reply::BadKey => Err(LlmError::ApiError {
                status: 400,
                code: Some("INVALID_ARGUMENT".into()),
                message: "API key not valid".into(),
            }),
        }
    }
    fn model_id(&self) -> &str { "stub" }
    fn is_local(&self) -> bool { true }
}

fn english_config() -> Config {
    let mut c = Config::default();
    c.ui.locale = Locale::En;
    c
}

fn app_with(backend: Option<Arc<StubBackend>>) -> Router {
    let llm = backend.map(|b| b as Arc<dyn LlmBackend>);
    build_router(AppState::new(english_config(), llm))
}

fn upload_request(file_name: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::post("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn analyze_request(digest: &str) -> Request<Body> {
    Request::post("/analyze")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("digest={digest}")))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn digest_in(html: &str) -> String {
    let marker = r#"name="digest" value=""#;
    let start = html.find(marker).expect("analyze form present") + marker.len();
    html[start..].split('"').next().unwrap().to_string()
}

#[tokio::test]
async fn test_index_shows_upload_form() {
    let (status, html) = send(&app_with(None), Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"enctype="multipart/form-data""#));
    assert!(html.contains("Please upload an Excel file"));
}

#[tokio::test]
async fn test_upload_renders_derived_table() {
    let (status, html) = send(&app_with(None), upload_request("bs.csv", BALANCE_SHEET)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Growth (%)"));
    assert!(html.contains("200.00%"));
    assert!(!html.contains("current ratio cannot be computed"));
    assert_eq!(digest_in(&html).len(), 64);
}

#[tokio::test]
async fn test_upload_without_total_assets_is_structural_error() {
    let (status, html) = send(&app_with(None), upload_request("bs.csv", "a,b,c\nCash,1,2\n")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Data structure error"));
    assert!(html.contains("TOTAL ASSETS"));
}

#[tokio::test]
async fn test_upload_without_liquidity_rows_warns() {
    let (status, html) = send(&app_with(None), upload_request("bs.csv", "a,b,c\nTOTAL ASSETS,1,2\n")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("current ratio cannot be computed"));
}

#[tokio::test]
async fn test_unsupported_file_is_generic_error() {
    let (status, html) = send(&app_with(None), upload_request("notes.txt", "hello")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("An error occurred while processing the file"));
}

#[tokio::test]
async fn test_analyze_renders_dashboard_and_commentary() {
    let stub = Arc::new(StubBackend {
        reply: Reply::Text("Liquidity is comfortable."),
        prompts: Mutex::new(Vec::new()),
    });
    let app = app_with(Some(stub.clone()));

    let (_, html) = send(&app, upload_request("bs.csv", BALANCE_SHEET)).await;
    let (status, html) = send(&app, analyze_request(&digest_in(&html))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Liquidity is comfortable."));
    assert!(html.contains("Current ratio"));
    assert!(html.contains(r#"<div class="stat-value">2.00</div>"#));
    assert_eq!(html.matches("<svg").count(), 3);
    let charts_at = html.find(r#"<h2 class="section-title">Detailed charts</h2>"#).unwrap();
    assert!(charts_at < html.find("<svg").unwrap());

    let prompts = stub.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("| Current ratio (current period) | 2.00 |"));
}

#[tokio::test]
async fn test_analyze_without_key_reports_missing_credential() {
    let app = app_with(None);
    let (_, html) = send(&app, upload_request("bs.csv", BALANCE_SHEET)).await;
    let (status, html) = send(&app, analyze_request(&digest_in(&html))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("GEMINI_API_KEY is not configured"));
    assert!(!html.contains("<svg"));
}

#[tokio::test]
async fn test_analyze_with_bad_key_shows_inline_message() {
    let stub = Arc::new(StubBackend { reply: Reply::BadKey, prompts: Mutex::new(Vec::new()) });
    let app = app_with(Some(stub));
    let (_, html) = send(&app, upload_request("bs.csv", BALANCE_SHEET)).await;
    let (status, html) = send(&app, analyze_request(&digest_in(&html))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("the API key is invalid or has expired"));
    assert!(html.contains("stats-grid"));
}

#[tokio::test]
async fn test_analyze_unknown_digest_asks_for_reupload() {
    let (status, html) = send(&app_with(None), analyze_request("deadbeef")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("upload the file again"));
}

#[tokio::test]
async fn test_analyze_without_digest_field_is_bad_request_page() {
    let req = Request::post("/analyze")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("nope=1"))
        .unwrap();
    let (status, html) = send(&app_with(None), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("The request was incomplete"));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
}

#[tokio::test]
async fn test_upload_without_multipart_body_is_bad_request_page() {
    let req = Request::post("/upload")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let (status, html) = send(&app_with(None), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app_with(None), Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""status":"ok""#));
}
