//! Job-board search. Boards are queried independently; one board failing is
//! logged and left out of the aggregate, never fatal to the search.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{ensure_success, ClientError};
use crate::models::job::{Job, JobPreferences};

pub const DEFAULT_BOARDS: &[(&str, &str)] = &[
    ("linkedin", "https://api.linkedin.com/v2/jobs"),
    ("indeed", "https://api.indeed.com/v2/jobs"),
    ("glassdoor", "https://api.glassdoor.com/v1/jobs"),
];

/// Search parameters sent to every board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobQuery {
    pub keywords: Vec<String>,
    pub location: String,
    pub min_salary: Option<u32>,
}

impl From<&JobPreferences> for JobQuery {
    fn from(prefs: &JobPreferences) -> Self {
        Self {
            keywords: prefs.keywords.clone(),
            location: prefs.location.clone(),
            min_salary: prefs.min_salary,
        }
    }
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    fn name(&self) -> &str;
    async fn search(&self, query: &JobQuery) -> Result<Vec<Job>, ClientError>;
}

pub struct HttpJobBoard {
    name: String,
    url: String,
    client: Client,
}

impl HttpJobBoard {
    pub fn new(name: impl Into<String>, url: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BoardResponse {
    #[serde(default)]
    jobs: Vec<Job>,
}

#[async_trait]
impl JobBoard for HttpJobBoard {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &JobQuery) -> Result<Vec<Job>, ClientError> {
        let mut params = vec![
            ("keywords", query.keywords.join(",")),
            ("location", query.location.clone()),
        ];
        if let Some(min) = query.min_salary {
            params.push(("salary_min", min.to_string()));
        }

        let response = self.client.get(&self.url).query(&params).send().await?;
        let response = ensure_success(response).await?;
        let body: BoardResponse = response.json().await?;
        Ok(body.jobs)
    }
}

/// Aggregate of one search across all boards.
#[derive(Debug, Default, Serialize)]
pub struct SearchResult {
    pub jobs: Vec<Job>,
    pub failed_boards: Vec<String>,
}

/// Queries every board concurrently. Results keep board order.
pub async fn search_all(boards: &[Arc<dyn JobBoard>], query: &JobQuery) -> SearchResult {
    let outcomes = join_all(boards.iter().map(|board| board.search(query))).await;

    let mut result = SearchResult::default();
    for (board, outcome) in boards.iter().zip(outcomes) {
        match outcome {
            Ok(jobs) => {
                info!("Board {} returned {} jobs", board.name(), jobs.len());
                result.jobs.extend(jobs);
            }
            Err(e) => {
                warn!("Failed to fetch jobs from {}: {e}", board.name());
                result.failed_boards.push(board.name().to_string());
            }
        }
    }
    result
}
