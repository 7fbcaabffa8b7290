//! Match-and-filter plus the auto-apply gate.

use serde::Serialize;

use crate::matching::scoring::RelevanceScorer;
use crate::models::job::Job;
use crate::models::resume::Resume;

/// Jobs must score strictly above this to be kept.
pub const MATCH_THRESHOLD: f64 = 0.7;
/// Jobs must score strictly above this (and allow quick apply) to be auto-applied.
pub const AUTO_APPLY_THRESHOLD: f64 = 0.85;

/// Scores every job, keeps those above `MATCH_THRESHOLD`, and sorts by score
/// descending. The sort is stable, so equal scores keep input order.
pub fn match_and_filter(scorer: &dyn RelevanceScorer, resume: &Resume, jobs: &[Job]) -> Vec<Job> {
    let mut matched: Vec<Job> = jobs
        .iter()
        .map(|job| job.with_score(scorer.score(resume, job)))
        .filter(|job| job.match_score.unwrap_or(0.0) > MATCH_THRESHOLD)
        .collect();

    matched.sort_by(|a, b| {
        b.match_score
            .unwrap_or(0.0)
            .total_cmp(&a.match_score.unwrap_or(0.0))
    });
    matched
}

pub fn should_auto_apply(job: &Job) -> bool {
    job.match_score.unwrap_or(0.0) > AUTO_APPLY_THRESHOLD && job.quick_apply_enabled
}

/// A matched job annotated with the auto-apply decision.
#[derive(Debug, Serialize)]
pub struct MatchedJob {
    #[serde(flatten)]
    pub job: Job,
    pub auto_apply: bool,
}

impl From<Job> for MatchedJob {
    fn from(job: Job) -> Self {
        let auto_apply = should_auto_apply(&job);
        Self { job, auto_apply }
    }
}
