use std::path::Path;

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeRef};
use crate::resume::source::{content_type_for, extract_text_blocking};
use crate::routes::UserIdQuery;
use crate::state::AppState;
use crate::store::{save_document, WriteMode, RESUME_REF_KEY};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Request body limit for the upload route: the file plus multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

#[derive(Deserialize)]
pub struct ParseRequest {
    pub raw_text: String,
}

/// POST /api/v1/resume/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(req): Json<ParseRequest>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(state.parser.parse(&req.raw_text)))
}

/// POST /api/v1/resume/upload?user_id=
///
/// Expects one multipart field `file` (PDF or plain text) of at most
/// `MAX_UPLOAD_BYTES`; the route carries a matching body limit. The file is only
/// stored once its text has been extracted, so an unreadable upload leaves
/// the user's current résumé reference untouched.
pub async fn handle_upload(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<Json<Resume>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .and_then(|name| Path::new(name).file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("resume.txt")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some((file_name, data));
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::Validation("Missing multipart field 'file'".to_string()))?;
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "File too large. Maximum size is 10MB".to_string(),
        ));
    }

    let text = extract_text_blocking(data.clone(), file_name.clone()).await?;
    let resume = state.parser.parse(&text);

    let key = format!("resumes/{}/{}-{}", params.user_id, Uuid::new_v4(), file_name);
    state
        .resumes
        .put(&key, data, content_type_for(&file_name))
        .await?;
    save_document(
        state.store.as_ref(),
        params.user_id,
        RESUME_REF_KEY,
        &ResumeRef::S3 { key },
        WriteMode::Overwrite,
    )
    .await?;

    info!(
        "Stored résumé for user {} ({} skills)",
        params.user_id,
        resume.skills.len()
    );
    Ok(Json(resume))
}
