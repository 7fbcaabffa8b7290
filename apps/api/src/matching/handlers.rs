use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::matcher::{match_and_filter, MatchedJob};
use crate::matching::pipeline::{run_job_search, SearchRunReport};
use crate::models::job::{Application, Job, JobPreferences};
use crate::models::resume::Resume;
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::store::{load_document, save_document, WriteMode, PREFERENCES_KEY};

#[derive(Deserialize)]
pub struct MatchRequest {
    pub resume: Resume,
    pub jobs: Vec<Job>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub jobs: Vec<MatchedJob>,
}

/// POST /api/v1/jobs/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Json<MatchResponse> {
    let jobs = match_and_filter(state.scorer.as_ref(), &req.resume, &req.jobs)
        .into_iter()
        .map(MatchedJob::from)
        .collect();
    Json(MatchResponse { jobs })
}

#[derive(Deserialize)]
pub struct SearchRunRequest {
    pub user_id: Uuid,
}

/// POST /api/v1/jobs/search-run
pub async fn handle_search_run(
    State(state): State<AppState>,
    Json(req): Json<SearchRunRequest>,
) -> Result<Json<SearchRunReport>, AppError> {
    Ok(Json(run_job_search(&state, req.user_id).await?))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(state.store.list_applications(params.user_id).await?))
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobPreferences>, AppError> {
    let doc =
        load_document::<JobPreferences>(state.store.as_ref(), params.user_id, PREFERENCES_KEY)
            .await?;
    Ok(Json(doc.value))
}

#[derive(Deserialize)]
pub struct PreferencesUpdate {
    pub user_id: Uuid,
    pub preferences: JobPreferences,
}

/// PUT /api/v1/preferences
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    Json(req): Json<PreferencesUpdate>,
) -> Result<Json<JobPreferences>, AppError> {
    save_document(
        state.store.as_ref(),
        req.user_id,
        PREFERENCES_KEY,
        &req.preferences,
        WriteMode::Overwrite,
    )
    .await?;
    Ok(Json(req.preferences))
}
