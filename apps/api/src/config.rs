use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;

use crate::clients::job_boards::DEFAULT_BOARDS;
use crate::interview::calendar::ConflictCheck;
use crate::resume::parser::UnknownLinePolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub email_api_url: String,
    pub email_api_key: Option<String>,
    pub email_from: String,
    pub notify_api_url: String,
    /// `(name, url)` per job board.
    pub job_boards: Vec<(String, String)>,
    /// The user's wall-clock offset for business hours and rendered dates.
    pub user_offset: FixedOffset,
    pub conflict_check: ConflictCheck,
    pub unknown_line_policy: UnknownLinePolicy,
    pub email_templates_path: Option<PathBuf>,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let offset_minutes: i32 = optional_env("USER_UTC_OFFSET_MINUTES")
            .unwrap_or_else(|| "0".to_string())
            .parse()
            .context("USER_UTC_OFFSET_MINUTES must be an integer")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            email_api_url: require_env("EMAIL_API_URL")?,
            email_api_key: optional_env("EMAIL_API_KEY"),
            email_from: optional_env("EMAIL_FROM")
                .unwrap_or_else(|| "noreply@jobpilot.local".to_string()),
            notify_api_url: require_env("NOTIFY_API_URL")?,
            job_boards: match optional_env("JOB_BOARD_URLS") {
                Some(raw) => parse_job_boards(&raw)?,
                None => DEFAULT_BOARDS
                    .iter()
                    .map(|(name, url)| (name.to_string(), url.to_string()))
                    .collect(),
            },
            user_offset: FixedOffset::east_opt(offset_minutes * 60)
                .ok_or_else(|| anyhow!("USER_UTC_OFFSET_MINUTES is out of range"))?,
            conflict_check: optional_env("CONFLICT_CHECK")
                .map(|v| v.parse::<ConflictCheck>().map_err(|e: String| anyhow!(e)))
                .transpose()?
                .unwrap_or_default(),
            unknown_line_policy: optional_env("UNKNOWN_LINE_POLICY")
                .map(|v| v.parse::<UnknownLinePolicy>().map_err(|e: String| anyhow!(e)))
                .transpose()?
                .unwrap_or_default(),
            email_templates_path: optional_env("EMAIL_TEMPLATES_PATH").map(PathBuf::from),
            http_timeout_secs: optional_env("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `name=url,name=url`.
fn parse_job_boards(raw: &str) -> Result<Vec<(String, String)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, url) = entry
                .split_once('=')
                .with_context(|| format!("JOB_BOARD_URLS entry '{entry}' must be name=url"))?;
            Ok((name.trim().to_string(), url.trim().to_string()))
        })
        .collect()
}
