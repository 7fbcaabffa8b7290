//! Interview request handling: parse, check the calendar, then either commit
//! the interview or propose alternatives.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::calendar::ConflictResolver;
use super::email::{Email, EmailComposer, EmailTemplates};
use super::models::Interview;
use super::notifications::{plan_all, NotificationTask};
use super::request::InterviewRequestExtractor;
use crate::clients::mailer::EmailSender;
use crate::clients::notifier::NotificationSink;
use crate::errors::AppError;
use crate::extract::StructuredExtractor;
use crate::models::calendar::Calendar;
use crate::store::{load_document, save_document, KvStore, StoreError, WriteMode, CALENDAR_KEY};

/// Calendar commits retried after a concurrent write before giving up.
pub const MAX_CALENDAR_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewState {
    Received,
    Parsed,
    Available,
    Unavailable,
    Scheduled,
    Negotiating,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewOutcome {
    /// Terminal state: `Scheduled` or `Negotiating`.
    pub state: InterviewState,
    /// Every state passed through, in order.
    pub transitions: Vec<InterviewState>,
    pub interview: Interview,
    pub email: Email,
    pub notifications: Vec<NotificationTask>,
    pub alternatives: Vec<DateTime<Utc>>,
}

pub struct InterviewOrchestrator<'a> {
    store: &'a dyn KvStore,
    mailer: &'a dyn EmailSender,
    notifier: &'a dyn NotificationSink,
    composer: EmailComposer<'a>,
    resolver: ConflictResolver,
}

impl<'a> InterviewOrchestrator<'a> {
    pub fn new(
        store: &'a dyn KvStore,
        mailer: &'a dyn EmailSender,
        notifier: &'a dyn NotificationSink,
        templates: &'a EmailTemplates,
        resolver: ConflictResolver,
    ) -> Self {
        Self {
            store,
            mailer,
            notifier,
            composer: EmailComposer::new(templates, resolver.offset),
            resolver,
        }
    }

    /// Runs one inbound message to a terminal state. Collaborator failures
    /// are logged here and returned unchanged; nothing is retried except a
    /// calendar commit that lost a race.
    pub async fn handle_request(
        &self,
        user_id: Uuid,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<InterviewOutcome, AppError> {
        self.run(user_id, message, now).await.map_err(|e| {
            error!("Failed to handle interview request for user {user_id}: {e}");
            e
        })
    }

    async fn run(
        &self,
        user_id: Uuid,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<InterviewOutcome, AppError> {
        let mut transitions = vec![InterviewState::Received];

        let interview = InterviewRequestExtractor::new(now, self.resolver.offset).extract(message);
        transitions.push(InterviewState::Parsed);
        info!(
            "Parsed interview request {} from '{}' for {}",
            interview.id, interview.company, interview.proposed_time
        );

        for attempt in 1..=MAX_CALENDAR_ATTEMPTS {
            let doc = load_document::<Calendar>(self.store, user_id, CALENDAR_KEY).await?;

            if !self.resolver.is_slot_free(
                interview.proposed_time,
                interview.duration_minutes,
                &doc.value,
            ) {
                transitions.push(InterviewState::Unavailable);
                return self.negotiate(interview, &doc.value, now, transitions).await;
            }

            let mut calendar = doc.value;
            calendar.events.push(interview.to_calendar_event());
            match save_document(
                self.store,
                user_id,
                CALENDAR_KEY,
                &calendar,
                WriteMode::IfVersion(doc.version),
            )
            .await
            {
                Ok(_) => {
                    transitions.push(InterviewState::Available);
                    return self.commit(interview, transitions).await;
                }
                Err(StoreError::VersionConflict { .. }) => {
                    warn!(
                        "Calendar for user {user_id} changed during commit (attempt {attempt}/{MAX_CALENDAR_ATTEMPTS})"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Conflict(format!(
            "Calendar for user {user_id} kept changing; interview {} was not scheduled",
            interview.id
        )))
    }

    /// The calendar event is already persisted; schedule notifications and
    /// send the confirmation.
    async fn commit(
        &self,
        interview: Interview,
        mut transitions: Vec<InterviewState>,
    ) -> Result<InterviewOutcome, AppError> {
        let notifications = plan_all(&interview);
        for task in &notifications {
            self.notifier.schedule(task).await?;
        }

        let email = self.composer.compose_confirmation(&interview);
        self.mailer.send(&email).await?;

        transitions.push(InterviewState::Scheduled);
        info!("Scheduled interview {} with {}", interview.id, interview.company);

        Ok(InterviewOutcome {
            state: InterviewState::Scheduled,
            transitions,
            interview,
            email,
            notifications,
            alternatives: Vec::new(),
        })
    }

    async fn negotiate(
        &self,
        interview: Interview,
        calendar: &Calendar,
        now: DateTime<Utc>,
        mut transitions: Vec<InterviewState>,
    ) -> Result<InterviewOutcome, AppError> {
        let alternatives =
            self.resolver
                .find_alternatives(calendar, interview.duration_minutes, now);
        let email = self.composer.compose_reschedule(&interview, &alternatives);
        self.mailer.send(&email).await?;

        transitions.push(InterviewState::Negotiating);
        info!(
            "Proposed {} alternative slots for interview {}",
            alternatives.len(),
            interview.id
        );

        Ok(InterviewOutcome {
            state: InterviewState::Negotiating,
            transitions,
            interview,
            email,
            notifications: Vec::new(),
            alternatives,
        })
    }
}
