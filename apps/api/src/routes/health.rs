use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const LIVENESS_MESSAGE: &str = "CV Review Service is running.";

/// GET /
pub async fn index_handler() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cv-review-api",
        "api_keys": state.api_key_count
    }))
}
