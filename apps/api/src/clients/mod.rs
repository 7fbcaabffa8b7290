//! Outbound HTTP collaborators: job boards, application submission, email
//! delivery and notification delivery.
//!
//! Every collaborator sits behind a trait so the engines and the orchestrator
//! can run against in-memory fakes. None of these clients retry; retry policy
//! belongs to the caller.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

pub mod apply;
pub mod job_boards;
pub mod mailer;
pub mod notifier;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream error (status {status}): {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Builds the shared HTTP client used by every collaborator.
pub fn build_http_client(timeout: Duration) -> Result<Client, ClientError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Turns a non-2xx response into `ClientError::Status`, preferring the
/// upstream's `{"error":{"message"}}` body when present.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message: upstream_message(body),
    })
}

fn upstream_message(body: String) -> String {
    serde_json::from_str::<UpstreamError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_prefers_error_body() {
        let body = r#"{"error":{"message":"quota exceeded"}}"#.to_string();
        assert_eq!(upstream_message(body), "quota exceeded");
    }

    #[test]
    fn test_upstream_message_falls_back_to_raw_body() {
        assert_eq!(upstream_message("Bad Gateway".to_string()), "Bad Gateway");
    }
}
