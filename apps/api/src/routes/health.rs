use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and which triage backend is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "snowbridge-api",
        "triage": {
            "backend": state.triage.backend(),
            "score_mode": format!("{:?}", state.config.score_mode).to_lowercase(),
        },
        "jobs": state.store.count().await,
    }))
}
