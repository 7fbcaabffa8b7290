use std::sync::Arc;

use crate::clients::apply::ApplicationSubmitter;
use crate::clients::job_boards::JobBoard;
use crate::clients::mailer::EmailSender;
use crate::clients::notifier::NotificationSink;
use crate::interview::calendar::ConflictResolver;
use crate::interview::email::EmailTemplates;
use crate::matching::scoring::RelevanceScorer;
use crate::resume::parser::ResumeParser;
use crate::resume::source::ResumeStore;
use crate::store::KvStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub boards: Vec<Arc<dyn JobBoard>>,
    pub submitter: Arc<dyn ApplicationSubmitter>,
    pub mailer: Arc<dyn EmailSender>,
    pub notifier: Arc<dyn NotificationSink>,
    /// Pluggable relevance scorer. Default: OverlapScorer.
    pub scorer: Arc<dyn RelevanceScorer>,
    pub parser: Arc<ResumeParser>,
    /// Loaded once at startup; never mutated.
    pub templates: Arc<EmailTemplates>,
    pub scheduling: ConflictResolver,
}
