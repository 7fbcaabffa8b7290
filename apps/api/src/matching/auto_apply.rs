//! Automated applications. Best-effort: a failed submission is logged and
//! counted, never propagated, so one bad posting cannot abort the batch.

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::apply::{ApplicationPayload, ApplicationSubmitter};
use crate::errors::AppError;
use crate::matching::cover_letter::generate_cover_letter;
use crate::matching::matcher::should_auto_apply;
use crate::models::job::{Application, ApplicationStatus, Job};
use crate::models::resume::Resume;
use crate::store::KvStore;

/// Aggregate outcome of one auto-apply batch.
#[derive(Debug, Default, Serialize)]
pub struct AutoApplyReport {
    pub applied: Vec<String>,
    pub failed: Vec<String>,
    /// Jobs that did not pass the auto-apply gate.
    pub skipped: usize,
}

/// Submits one application and records it. Errors are returned to the caller.
async fn submit_application(
    job: &Job,
    resume: &Resume,
    user_id: Uuid,
    submitter: &dyn ApplicationSubmitter,
    store: &dyn KvStore,
) -> Result<Application, AppError> {
    let payload = ApplicationPayload {
        resume,
        cover_letter: generate_cover_letter(job, resume),
        contact: &resume.contact,
    };
    submitter.submit(job, &payload).await?;

    let application = Application {
        job_id: job.id.clone(),
        status: ApplicationStatus::Applied,
        date: Utc::now(),
        automated: true,
    };
    store.append_application(user_id, &application).await?;
    Ok(application)
}

/// Applies to a single job, logging and swallowing any failure.
pub async fn auto_apply(
    job: &Job,
    resume: &Resume,
    user_id: Uuid,
    submitter: &dyn ApplicationSubmitter,
    store: &dyn KvStore,
) -> Option<Application> {
    match submit_application(job, resume, user_id, submitter, store).await {
        Ok(application) => {
            info!("Auto-applied to job {} ({})", job.id, job.company);
            Some(application)
        }
        Err(e) => {
            warn!("Auto-apply failed for job {}: {e}", job.id);
            None
        }
    }
}

/// Auto-applies to every eligible job concurrently.
pub async fn auto_apply_batch(
    jobs: &[Job],
    resume: &Resume,
    user_id: Uuid,
    submitter: &dyn ApplicationSubmitter,
    store: &dyn KvStore,
) -> AutoApplyReport {
    let (eligible, ineligible): (Vec<&Job>, Vec<&Job>) =
        jobs.iter().partition(|job| should_auto_apply(job));

    let outcomes = join_all(
        eligible
            .iter()
            .map(|job| auto_apply(job, resume, user_id, submitter, store)),
    )
    .await;

    let mut report = AutoApplyReport {
        skipped: ineligible.len(),
        ..Default::default()
    };
    for (job, outcome) in eligible.into_iter().zip(outcomes) {
        match outcome {
            Some(_) => report.applied.push(job.id.clone()),
            None => report.failed.push(job.id.clone()),
        }
    }

    info!(
        "Auto-apply batch for user {user_id}: {} applied, {} failed, {} skipped",
        report.applied.len(),
        report.failed.len(),
        report.skipped
    );
    report
}
