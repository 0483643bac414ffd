//! Axum route handlers for the Jobs and Triage API.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::validation::{validate_submission, SubmitRequest};
use crate::models::job::Job;
use crate::state::AppState;
use crate::triage::Triaged;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub job: Job,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub jobs: Vec<Job>,
    pub count: usize,
}

impl From<Vec<Job>> for FeedResponse {
    fn from(jobs: Vec<Job>) -> Self {
        Self {
            count: jobs.len(),
            jobs,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
///
/// Validates the form, triages it, and stores it as an open job.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(form): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let request = validate_submission(form)?;
    let job = state.store.submit(request, &state.triage).await;

    let message = format!("Request submitted! ID: {}", job.id);
    Ok((StatusCode::CREATED, Json(SubmitResponse { job, message })))
}

/// GET /api/v1/jobs
///
/// Volunteer feed: open jobs only, most urgent first.
pub async fn handle_feed(State(state): State<AppState>) -> Json<FeedResponse> {
    Json(state.store.list_open().await.into())
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Job>, AppError> {
    let Path(id) = id?;
    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// POST /api/v1/jobs/:id/claim
pub async fn handle_claim(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Job>, AppError> {
    let Path(id) = id?;
    let job = state.store.claim(id).await?;
    Ok(Json(job))
}

/// POST /api/v1/jobs/reset
///
/// Replaces every job with the demo data and returns the fresh feed.
pub async fn handle_reset(State(state): State<AppState>) -> Json<FeedResponse> {
    state.store.reset_to_seed().await;
    Json(state.store.list_open().await.into())
}

/// POST /api/v1/triage
///
/// Classifies a request without storing it.
pub async fn handle_triage_preview(
    State(state): State<AppState>,
    Json(form): Json<SubmitRequest>,
) -> Result<Json<Triaged>, AppError> {
    let request = validate_submission(form)?;
    Ok(Json(state.triage.assess(&request).await))
}
