use std::sync::Arc;

use axum::{routing::get, Json, Router};
use chrono::Utc;
use etf_helper_core::response::ApiResponse;

use crate::main_lib::AppState;
use crate::models::HealthPayload;

/// Process liveness check.
async fn health_check() -> Json<ApiResponse<HealthPayload>> {
    Json(ApiResponse::success(HealthPayload {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}
