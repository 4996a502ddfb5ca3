//! Health check endpoint

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub message: String,
}

/// `GET /health` — liveness probe for monitoring and load balancers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        message: "medinfo is alive".to_string(),
    })
}
