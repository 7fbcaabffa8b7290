//! Fakes and builders shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::FixedOffset;

use crate::clients::apply::{ApplicationPayload, ApplicationSubmitter};
use crate::clients::job_boards::{JobBoard, JobQuery};
use crate::clients::mailer::EmailSender;
use crate::clients::notifier::NotificationSink;
use crate::clients::ClientError;
use crate::errors::AppError;
use crate::interview::calendar::{ConflictCheck, ConflictResolver};
use crate::interview::email::{Email, EmailTemplates};
use crate::interview::notifications::NotificationTask;
use crate::matching::scoring::OverlapScorer;
use crate::models::job::Job;
use crate::models::resume::Resume;
use crate::resume::parser::{ResumeParser, UnknownLinePolicy};
use crate::resume::source::ResumeStore;
use crate::state::AppState;
use crate::store::memory::MemoryStore;

pub fn job(id: &str, description: &str) -> Job {
    Job {
        id: id.to_string(),
        title: format!("Engineer {id}"),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        description: description.to_string(),
        salary: None,
        apply_url: format!("https://jobs.example.com/{id}/apply"),
        quick_apply_enabled: false,
        match_score: None,
        posted: "2026-01-01".to_string(),
    }
}

pub fn resume_with_skills(skills: &[&str]) -> Resume {
    Resume {
        skills: skills.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn upstream_down() -> ClientError {
    ClientError::Status {
        status: 503,
        message: "upstream unavailable".to_string(),
    }
}

pub struct FakeBoard {
    name: String,
    jobs: Option<Vec<Job>>,
}

impl FakeBoard {
    pub fn ok(name: &str, jobs: Vec<Job>) -> Self {
        Self {
            name: name.to_string(),
            jobs: Some(jobs),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            jobs: None,
        }
    }
}

#[async_trait]
impl JobBoard for FakeBoard {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, _query: &JobQuery) -> Result<Vec<Job>, ClientError> {
        self.jobs.clone().ok_or_else(upstream_down)
    }
}

/// Records `(job_id, cover_letter, contact_email)` per submission.
#[derive(Default)]
pub struct FakeSubmitter {
    failing: HashSet<String>,
    submissions: Mutex<Vec<(String, String, String)>>,
}

impl FakeSubmitter {
    pub fn failing_for(job_ids: &[&str]) -> Self {
        Self {
            failing: job_ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn submissions(&self) -> Vec<(String, String, String)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplicationSubmitter for FakeSubmitter {
    async fn submit(
        &self,
        job: &Job,
        payload: &ApplicationPayload<'_>,
    ) -> Result<(), ClientError> {
        if self.failing.contains(&job.id) {
            return Err(upstream_down());
        }
        self.submissions.lock().unwrap().push((
            job.id.clone(),
            payload.cover_letter.clone(),
            payload.contact.email.clone(),
        ));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeMailer {
    fail: bool,
    sent: Mutex<Vec<Email>>,
}

impl FakeMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for FakeMailer {
    async fn send(&self, email: &Email) -> Result<(), ClientError> {
        if self.fail {
            return Err(upstream_down());
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    fail: bool,
    scheduled: Mutex<Vec<NotificationTask>>,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn scheduled(&self) -> Vec<NotificationTask> {
        self.scheduled.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for FakeNotifier {
    async fn schedule(&self, task: &NotificationTask) -> Result<(), ClientError> {
        if self.fail {
            return Err(upstream_down());
        }
        self.scheduled.lock().unwrap().push(task.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryResumeStore {
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryResumeStore {
    pub fn insert(&self, key: &str, text: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::copy_from_slice(text.as_bytes()));
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn put(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, AppError> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::Parse(format!("{key} does not exist")))
    }
}

/// State wired entirely to in-memory fakes, UTC, default policies.
pub fn test_state() -> AppState {
    AppState {
        store: Arc::new(MemoryStore::default()),
        resumes: Arc::new(MemoryResumeStore::default()),
        boards: Vec::new(),
        submitter: Arc::new(FakeSubmitter::default()),
        mailer: Arc::new(FakeMailer::default()),
        notifier: Arc::new(FakeNotifier::default()),
        scorer: Arc::new(OverlapScorer),
        parser: Arc::new(ResumeParser::new(UnknownLinePolicy::default())),
        templates: Arc::new(EmailTemplates::default()),
        scheduling: ConflictResolver::new(
            ConflictCheck::StartInstant,
            FixedOffset::east_opt(0).expect("zero offset is valid"),
        ),
    }
}
