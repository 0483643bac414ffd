//! In-memory job store. Lives for the lifetime of the process.
//!
//! One `RwLock` serializes every write: id assignment on submit, the
//! check-then-set on claim, and the wholesale swap on reset.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::jobs::seed::seed_jobs;
use crate::models::job::{Job, JobStatus, Request};
use crate::triage::Triage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The id does not exist or the job was already claimed.
    #[error("Job {0} is unavailable")]
    Unavailable(u64),
}

/// Shared handle to the job list. Cheap to clone.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<Vec<Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the demo jobs.
    pub fn seeded() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(seed_jobs())),
        }
    }

    /// Triages the request and stores it as a new open job.
    ///
    /// Triage runs before the write lock is taken, so a slow classifier never
    /// blocks claims or the feed.
    pub async fn submit(&self, request: Request, triage: &Triage) -> Job {
        let triaged = triage.assess(&request).await;

        let mut jobs = self.jobs.write().await;
        let id = next_id(&jobs);
        let job = Job {
            id,
            request,
            assessment: triaged.assessment,
            triaged_by: triaged.source,
            status: JobStatus::Open,
            created_at: Utc::now(),
            claimed_at: None,
        };
        jobs.push(job.clone());

        info!(
            job_id = id,
            score = job.assessment.urgency_score,
            category = ?job.assessment.category,
            "Job submitted"
        );
        job
    }

    /// Open jobs, most urgent first. Equal scores keep insertion order.
    pub async fn list_open(&self) -> Vec<Job> {
        let jobs = self.jobs.read().await;
        let mut open: Vec<Job> = jobs.iter().filter(|j| j.is_open()).cloned().collect();
        open.sort_by(|a, b| b.assessment.urgency_score.cmp(&a.assessment.urgency_score));
        open
    }

    /// Looks up a job of any status.
    pub async fn get(&self, id: u64) -> Option<Job> {
        self.jobs.read().await.iter().find(|j| j.id == id).cloned()
    }

    /// Claims an open job. Fails without side effects when the id is absent
    /// or the job is already claimed.
    pub async fn claim(&self, id: u64) -> Result<Job, StoreError> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id && j.is_open())
            .ok_or(StoreError::Unavailable(id))?;

        job.status = JobStatus::Claimed;
        job.claimed_at = Some(Utc::now());

        info!(job_id = id, "Job claimed");
        Ok(job.clone())
    }

    /// Replaces the entire store with the demo data set.
    pub async fn reset_to_seed(&self) {
        let mut jobs = self.jobs.write().await;
        *jobs = seed_jobs();
        info!(count = jobs.len(), "Job store reset to seed data");
    }

    pub async fn count(&self) -> usize {
        self.jobs.read().await.len()
    }
}

/// One more than the current maximum id, or 1 when empty.
fn next_id(jobs: &[Job]) -> u64 {
    jobs.iter().map(|j| j.id).max().map_or(1, |max| max + 1)
}
