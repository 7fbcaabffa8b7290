use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::email::{Email, EmailComposer};
use crate::interview::orchestrator::{InterviewOrchestrator, InterviewOutcome};
use crate::models::calendar::Calendar;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::store::{load_document, CALENDAR_KEY};

#[derive(Deserialize)]
pub struct InterviewRequestBody {
    pub user_id: Uuid,
    pub message: String,
}

/// POST /api/v1/interviews/requests
pub async fn handle_interview_request(
    State(state): State<AppState>,
    Json(req): Json<InterviewRequestBody>,
) -> Result<Json<InterviewOutcome>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("Interview request message is empty".to_string()));
    }

    let orchestrator = InterviewOrchestrator::new(
        state.store.as_ref(),
        state.mailer.as_ref(),
        state.notifier.as_ref(),
        &state.templates,
        state.scheduling,
    );
    let outcome = orchestrator
        .handle_request(req.user_id, &req.message, Utc::now())
        .await?;
    Ok(Json(outcome))
}

/// GET /api/v1/calendar
pub async fn handle_get_calendar(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Calendar>, AppError> {
    let doc = load_document::<Calendar>(state.store.as_ref(), params.user_id, CALENDAR_KEY).await?;
    Ok(Json(doc.value))
}

#[derive(Deserialize)]
pub struct FollowUpRequest {
    pub to: String,
    pub position: String,
}

/// POST /api/v1/interviews/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Json(req): Json<FollowUpRequest>,
) -> Result<Json<Email>, AppError> {
    if req.to.trim().is_empty() {
        return Err(AppError::Validation("Recipient is required".to_string()));
    }

    let email = EmailComposer::new(&state.templates, state.scheduling.offset)
        .compose_follow_up(&req.to, &req.position);
    state.mailer.send(&email).await?;
    Ok(Json(email))
}
