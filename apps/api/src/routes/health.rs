use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus whether the AI credential is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "engipath-api",
        "model": state.config.gemini_model,
        "apiKeyConfigured": state.config.api_key.is_some(),
        "sessions": state.sessions.len().await
    }))
}
