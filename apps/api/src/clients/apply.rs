use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{ensure_success, ClientError};
use crate::models::job::Job;
use crate::models::resume::{ContactInfo, Resume};

/// Body posted to a job's apply URL.
#[derive(Debug, Serialize)]
pub struct ApplicationPayload<'a> {
    pub resume: &'a Resume,
    pub cover_letter: String,
    pub contact: &'a ContactInfo,
}

#[async_trait]
pub trait ApplicationSubmitter: Send + Sync {
    async fn submit(&self, job: &Job, payload: &ApplicationPayload<'_>)
        -> Result<(), ClientError>;
}

pub struct HttpApplicationSubmitter {
    client: Client,
}

impl HttpApplicationSubmitter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApplicationSubmitter for HttpApplicationSubmitter {
    async fn submit(
        &self,
        job: &Job,
        payload: &ApplicationPayload<'_>,
    ) -> Result<(), ClientError> {
        let response = self.client.post(&job.apply_url).json(payload).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
