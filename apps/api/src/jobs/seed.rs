//! Fixed demo data loaded on startup and by the reset operation.

use chrono::Utc;

use crate::models::assessment::{Category, TriageSource, UrgencyAssessment};
use crate::models::job::{Job, JobStatus, Request};

struct SeedJob {
    title: &'static str,
    location: &'static str,
    body: &'static str,
    urgency_score: u8,
    category: Category,
    summary: &'static str,
    is_critical: bool,
}

const SEED_JOBS: &[SeedJob] = &[
    SeedJob {
        title: "Dialysis patient snowed in",
        location: "123 Maple St",
        body: "Dialysis patient here. Driveway blocked by 3 feet of snow. Emergency exit inaccessible.",
        urgency_score: 10,
        category: Category::Medical,
        summary: "Medical Emergency: Driveway Blocked",
        is_critical: true,
    },
    SeedJob {
        title: "Meds in the mailbox",
        location: "456 Oak Ave",
        body: "I can't get to my mailbox. My meds are in there.",
        urgency_score: 7,
        category: Category::Access,
        summary: "Meds in Mailbox",
        is_critical: false,
    },
    SeedJob {
        title: "Wheelchair ramp buried",
        location: "789 Birch Rd",
        body: "I use a wheelchair and the ramp to my front door is completely buried.",
        urgency_score: 8,
        category: Category::Mobility,
        summary: "Wheelchair ramp buried",
        is_critical: false,
    },
    SeedJob {
        title: "Need to leave for work",
        location: "22 Cedar Ln",
        body: "Plow ridge at the end of the driveway. I need to leave by 7am for my shift.",
        urgency_score: 5,
        category: Category::Access,
        summary: "Driveway plow ridge",
        is_critical: false,
    },
    SeedJob {
        title: "Sidewalk shoveling",
        location: "9 Elm Ct",
        body: "Sidewalk in front of the house has not been shoveled since Tuesday.",
        urgency_score: 3,
        category: Category::General,
        summary: "Sidewalk shoveling",
        is_critical: false,
    },
];

/// Builds the demo jobs with ids 1..=5, all open, assessments pre-populated.
pub fn seed_jobs() -> Vec<Job> {
    let now = Utc::now();
    SEED_JOBS
        .iter()
        .zip(1u64..)
        .map(|(seed, id)| Job {
            id,
            request: Request {
                title: seed.title.to_string(),
                location: seed.location.to_string(),
                body: seed.body.to_string(),
            },
            assessment: UrgencyAssessment {
                urgency_score: seed.urgency_score,
                category: seed.category,
                summary: seed.summary.to_string(),
                is_critical: seed.is_critical,
            },
            triaged_by: TriageSource::Seed,
            status: JobStatus::Open,
            created_at: now,
            claimed_at: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_five_open_jobs_with_sequential_ids() {
        let jobs = seed_jobs();
        assert_eq!(jobs.len(), 5);
        assert_eq!(jobs.iter().map(|j| j.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert!(jobs.iter().all(|j| j.is_open()));
        assert!(jobs.iter().all(|j| j.triaged_by == TriageSource::Seed));
    }

    #[test]
    fn test_first_seed_job_is_critical_dialysis() {
        let job = &seed_jobs()[0];
        assert_eq!(job.assessment.urgency_score, 10);
        assert_eq!(job.assessment.category, Category::Medical);
        assert!(job.assessment.is_critical);
        assert_eq!(job.request.location, "123 Maple St");
    }

    #[test]
    fn test_seed_scores_in_range() {
        assert!(seed_jobs()
            .iter()
            .all(|j| (1..=10).contains(&j.assessment.urgency_score)));
    }
}
