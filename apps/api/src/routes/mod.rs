pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::interview::handlers as interview;
use crate::matching::handlers as matching;
use crate::resume::handlers as resume;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé
        .route("/api/v1/resume/parse", post(resume::handle_parse))
        .route(
            "/api/v1/resume/upload",
            post(resume::handle_upload)
                .layer(DefaultBodyLimit::max(resume::UPLOAD_BODY_LIMIT)),
        )
        // Jobs
        .route(
            "/api/v1/preferences",
            get(matching::handle_get_preferences).put(matching::handle_put_preferences),
        )
        .route("/api/v1/jobs/match", post(matching::handle_match))
        .route("/api/v1/jobs/search-run", post(matching::handle_search_run))
        .route(
            "/api/v1/applications",
            get(matching::handle_list_applications),
        )
        // Interviews
        .route(
            "/api/v1/interviews/requests",
            post(interview::handle_interview_request),
        )
        .route("/api/v1/calendar", get(interview::handle_get_calendar))
        .route(
            "/api/v1/interviews/follow-up",
            post(interview::handle_follow_up),
        )
        .with_state(state)
}
