/*
 * Responsibility
 * - GET / and GET /api/health (liveness, no auth)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "service": "Cloud Run bearer gate"})),
    )
}

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "message": "Service is running"})),
    )
}
