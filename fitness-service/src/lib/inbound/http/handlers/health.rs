use axum::Json;
use serde_json::json;
use serde_json::Value;

/// Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Fitness Tracker API" }))
}

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
