use axum::{http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub detail: String,
    pub checked_at: String,
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ready",
            detail: "pollbot-server runtime initialized".to_string(),
            checked_at: Utc::now().to_rfc3339(),
        }),
    )
}
