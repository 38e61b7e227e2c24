//! Axum router — maps all URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use std::sync::Arc;

use crate::handlers::{
    analyze::analyze_submit,
    system::{health, stylesheet},
    upload::{upload_page, upload_submit},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",        get(upload_page))
        .route("/upload",  get(upload_page).post(upload_submit))
        .route("/analyze", post(analyze_submit))

        .route("/health",  get(health))
        .route("/static/main.css", get(stylesheet))

        // Middleware
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
