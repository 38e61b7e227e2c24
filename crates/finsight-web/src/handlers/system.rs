//! Liveness probe and bundled stylesheet.

use axum::{
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::html::MAIN_CSS;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], MAIN_CSS)
}
