mod clients;
mod config;
mod db;
mod errors;
mod extract;
mod interview;
mod matching;
mod models;
mod resume;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clients::apply::HttpApplicationSubmitter;
use crate::clients::build_http_client;
use crate::clients::job_boards::{HttpJobBoard, JobBoard};
use crate::clients::mailer::HttpEmailSender;
use crate::clients::notifier::HttpNotificationSink;
use crate::config::Config;
use crate::db::create_pool;
use crate::interview::calendar::ConflictResolver;
use crate::interview::email::EmailTemplates;
use crate::matching::scoring::OverlapScorer;
use crate::resume::parser::ResumeParser;
use crate::resume::source::S3ResumeStore;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobPilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (migrations run on connect)
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    let http = build_http_client(Duration::from_secs(config.http_timeout_secs))?;

    let boards: Vec<Arc<dyn JobBoard>> = config
        .job_boards
        .iter()
        .map(|(name, url)| {
            Arc::new(HttpJobBoard::new(name.as_str(), url.as_str(), http.clone()))
                as Arc<dyn JobBoard>
        })
        .collect();
    info!("{} job boards configured", boards.len());

    let templates = match &config.email_templates_path {
        Some(path) => {
            info!("Loading email templates from {}", path.display());
            EmailTemplates::from_json_file(path)?
        }
        None => EmailTemplates::default(),
    };

    info!(
        "Scheduling: {:?} check, user offset {}",
        config.conflict_check, config.user_offset
    );

    // Build app state
    let state = AppState {
        store: Arc::new(PgStore::new(db)),
        resumes: Arc::new(S3ResumeStore::new(s3, config.s3_bucket.clone())),
        boards,
        submitter: Arc::new(HttpApplicationSubmitter::new(http.clone())),
        mailer: Arc::new(HttpEmailSender::new(
            http.clone(),
            config.email_api_url.clone(),
            config.email_api_key.clone(),
            config.email_from.clone(),
        )),
        notifier: Arc::new(HttpNotificationSink::new(
            http,
            config.notify_api_url.clone(),
        )),
        scorer: Arc::new(OverlapScorer),
        parser: Arc::new(ResumeParser::new(config.unknown_line_policy)),
        templates: Arc::new(templates),
        scheduling: ConflictResolver::new(config.conflict_check, config.user_offset),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins before exposing beyond localhost

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "jobpilot-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
