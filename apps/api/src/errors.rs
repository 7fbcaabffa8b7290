use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::clients::ClientError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The résumé source could not be read at all.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(#[from] ClientError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("S3 error: {0}")]
    Storage(String),

    /// Optimistic write retries exhausted.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Parse(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "PARSE_ERROR",
                format!("The résumé could not be read: {msg}"),
            ),
            AppError::Network(e) => {
                tracing::error!("Network error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "NETWORK_ERROR",
                    "An upstream service failed".to_string(),
                )
            }
            AppError::Persistence(StoreError::VersionConflict { key }) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Document '{key}' was modified concurrently"),
            ),
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "S3_ERROR",
                    "A file storage error occurred".to_string(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_maps_to_422() {
        let response = AppError::Parse("not UTF-8".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_version_conflict_maps_to_409() {
        let err = AppError::from(StoreError::VersionConflict {
            key: "calendar".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_network_error_maps_to_502() {
        let err = AppError::from(ClientError::Status {
            status: 503,
            message: "down".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
