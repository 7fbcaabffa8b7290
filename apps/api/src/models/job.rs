use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job posting as returned by a job board.
/// `match_score` is the only field assigned locally, always on a copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub salary: Option<String>,
    pub apply_url: String,
    #[serde(default)]
    pub quick_apply_enabled: bool,
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub posted: String,
}

impl Job {
    /// Returns a copy of this job carrying the given match score.
    pub fn with_score(&self, score: f64) -> Job {
        Job {
            match_score: Some(score),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPreferences {
    pub keywords: Vec<String>,
    pub location: String,
    pub min_salary: Option<u32>,
    pub job_types: Vec<String>,
    pub remote: bool,
    pub industries: Option<Vec<String>>,
    pub auto_apply_threshold: f64,
}

impl Default for JobPreferences {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            location: String::new(),
            min_salary: None,
            job_types: Vec::new(),
            remote: false,
            industries: None,
            auto_apply_threshold: 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "applied" => Some(ApplicationStatus::Applied),
            _ => None,
        }
    }
}

/// One submitted application. Recorded append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub job_id: String,
    pub status: ApplicationStatus,
    pub date: DateTime<Utc>,
    pub automated: bool,
}

#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub job_id: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub automated: bool,
}

impl From<ApplicationRow> for Application {
    fn from(row: ApplicationRow) -> Self {
        Application {
            job_id: row.job_id,
            // Only "applied" is ever written.
            status: ApplicationStatus::parse(&row.status).unwrap_or(ApplicationStatus::Applied),
            date: row.applied_at,
            automated: row.automated,
        }
    }
}
