use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::Interview;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Reminder,
    Preparation,
    /// New postings found by a background search run.
    JobMatches,
}

/// A scheduled reminder or preparation item tied to one interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationTask {
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
    pub category: NotificationCategory,
    pub correlation_id: Uuid,
}

/// (minutes before the interview, body)
const REMINDERS: [(i64, &str); 3] = [
    (24 * 60, "24 hours until your interview"),
    (60, "1 hour until your interview"),
    (15, "15 minutes until your interview"),
];

/// (hours before the interview, title, body)
const PREPARATION: [(i64, &str, &str); 4] = [
    (48, "Research Company", "Research recent news, culture, and products"),
    (
        24,
        "Review Job Description",
        "Review requirements and prepare relevant examples",
    ),
    (
        24,
        "Technical Preparation",
        "Review common technical questions and prepare code samples",
    ),
    (
        1,
        "Test Interview Platform",
        "Ensure camera, microphone, and platform are working",
    ),
];

pub fn plan_reminders(interview: &Interview) -> Vec<NotificationTask> {
    REMINDERS
        .iter()
        .map(|(minutes, body)| NotificationTask {
            title: format!("Interview with {}", interview.company),
            body: (*body).to_string(),
            fire_at: interview.proposed_time - Duration::minutes(*minutes),
            category: NotificationCategory::Reminder,
            correlation_id: interview.id,
        })
        .collect()
}

pub fn plan_preparation(interview: &Interview) -> Vec<NotificationTask> {
    PREPARATION
        .iter()
        .map(|(hours, title, body)| NotificationTask {
            title: (*title).to_string(),
            body: (*body).to_string(),
            fire_at: interview.proposed_time - Duration::hours(*hours),
            category: NotificationCategory::Preparation,
            correlation_id: interview.id,
        })
        .collect()
}

/// Immediate notice that a search run found matching postings.
pub fn plan_job_matches(match_count: usize, now: DateTime<Utc>, run_id: Uuid) -> NotificationTask {
    let noun = if match_count == 1 { "job matches" } else { "jobs match" };
    NotificationTask {
        title: "New job matches".to_string(),
        body: format!("{match_count} new {noun} your profile"),
        fire_at: now,
        category: NotificationCategory::JobMatches,
        correlation_id: run_id,
    }
}

/// Reminders followed by preparation tasks.
pub fn plan_all(interview: &Interview) -> Vec<NotificationTask> {
    let mut tasks = plan_reminders(interview);
    tasks.extend(plan_preparation(interview));
    tasks
}
