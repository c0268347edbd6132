use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portfolio-api"
    }))
}

/// GET /api/test
/// Liveness ping used by the frontend to check the server is up.
pub async fn ping_handler() -> Json<Value> {
    Json(json!({
        "message": "Server is running!",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
