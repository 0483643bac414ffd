use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::assessment::{TriageSource, UrgencyAssessment};

/// A resident's help request as submitted through the form. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub title: String,
    pub location: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    Claimed,
}

/// A request held by the job store, together with its triage result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub request: Request,
    pub assessment: UrgencyAssessment,
    pub triaged_by: TriageSource,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }
}
