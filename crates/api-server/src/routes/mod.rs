use crate::AppState;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

pub mod content;

#[derive(Debug, Serialize)]
struct StatusResponse {
    message: String,
    version: String,
    environment: String,
}

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/status", get(get_system_status))
}

async fn get_system_status() -> impl IntoResponse {
    let status = StatusResponse {
        message: "Tutorial content service is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: std::env::var("ENV").unwrap_or_else(|_| "development".to_string()),
    };
    Json(status)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
