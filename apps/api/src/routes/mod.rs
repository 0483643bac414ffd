pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resident form + volunteer feed
        .route(
            "/api/v1/jobs",
            get(handlers::handle_feed).post(handlers::handle_submit),
        )
        .route("/api/v1/jobs/reset", post(handlers::handle_reset))
        .route("/api/v1/jobs/:id", get(handlers::handle_get_job))
        .route("/api/v1/jobs/:id/claim", post(handlers::handle_claim))
        // Triage preview (no job created)
        .route("/api/v1/triage", post(handlers::handle_triage_preview))
        .with_state(state)
}
