use axum::Json;

use crate::core::models::HealthResponse;

/// Liveness check for GET /health.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
