//! One scheduled job-search run for one user: search every board, rank the
//! postings against the stored résumé, auto-apply where allowed.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::job_boards::{search_all, JobQuery};
use crate::errors::AppError;
use crate::interview::notifications::plan_job_matches;
use crate::matching::auto_apply::{auto_apply_batch, AutoApplyReport};
use crate::matching::matcher::{match_and_filter, MatchedJob};
use crate::models::job::JobPreferences;
use crate::models::resume::ResumeRef;
use crate::resume::source::load_resume_text;
use crate::state::AppState;
use crate::store::{load_document, load_optional, PREFERENCES_KEY, RESUME_REF_KEY};

#[derive(Debug, Serialize)]
pub struct SearchRunReport {
    pub user_id: Uuid,
    /// Postings returned by all boards that answered.
    pub jobs_found: usize,
    pub matched: Vec<MatchedJob>,
    pub auto_apply: AutoApplyReport,
    pub failed_boards: Vec<String>,
    /// Whether the user was notified about new matches.
    pub notified: bool,
}

pub async fn run_job_search(state: &AppState, user_id: Uuid) -> Result<SearchRunReport, AppError> {
    let preferences =
        load_document::<JobPreferences>(state.store.as_ref(), user_id, PREFERENCES_KEY)
            .await?
            .value;
    let reference = load_optional::<ResumeRef>(state.store.as_ref(), user_id, RESUME_REF_KEY)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("User {user_id} has not uploaded a résumé"))
        })?;

    let text = load_resume_text(state.resumes.as_ref(), &reference).await?;
    let resume = state.parser.parse(&text);

    let query = JobQuery::from(&preferences);
    let search = search_all(&state.boards, &query).await;
    let jobs_found = search.jobs.len();

    let matched = match_and_filter(state.scorer.as_ref(), &resume, &search.jobs);
    info!(
        "Search run for user {user_id}: {jobs_found} postings, {} matched",
        matched.len()
    );

    let notified = notify_new_matches(state, user_id, matched.len()).await;

    let auto_apply = auto_apply_batch(
        &matched,
        &resume,
        user_id,
        state.submitter.as_ref(),
        state.store.as_ref(),
    )
    .await;

    Ok(SearchRunReport {
        user_id,
        jobs_found,
        matched: matched.into_iter().map(MatchedJob::from).collect(),
        auto_apply,
        failed_boards: search.failed_boards,
        notified,
    })
}

/// Best-effort: a delivery failure is logged and never fails the run.
async fn notify_new_matches(state: &AppState, user_id: Uuid, match_count: usize) -> bool {
    if match_count == 0 {
        return false;
    }
    let task = plan_job_matches(match_count, Utc::now(), Uuid::new_v4());
    match state.notifier.schedule(&task).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to notify user {user_id} about {match_count} new matches: {e}");
            false
        }
    }
}
