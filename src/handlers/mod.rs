pub mod products;
pub mod records;
pub mod seed;
pub mod stats;

use axum::{http::StatusCode, Json};
use serde_json::json;

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "service": "stockroom-service" })))
}
