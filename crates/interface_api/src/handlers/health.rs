//! Health handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Liveness check
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness check: verifies the ledger answers
pub async fn readiness_check(State(state): State<AppState>) -> Json<Value> {
    match state.ledger.list_periods().await {
        Ok(_) => Json(json!({ "status": "ready" })),
        Err(e) => Json(json!({ "status": "degraded", "ledger": e.to_string() })),
    }
}
