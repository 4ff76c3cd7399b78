//! Health Handlers

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// GET /api/health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "message": "healthy" })))
}
