use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-analyzer"
    }))
}

/// GET /health/llm
/// Sends a one-word prompt to the model to confirm the key and endpoint work.
pub async fn llm_health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let reply = state.llm.ping().await?;
    Ok(Json(json!({
        "status": "ok",
        "model": MODEL,
        "reply": reply
    })))
}
