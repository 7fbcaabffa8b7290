use async_trait::async_trait;
use reqwest::Client;

use super::{ensure_success, ClientError};
use crate::interview::notifications::NotificationTask;

/// Delivery of scheduled notifications. Exactly-once delivery is the sink's
/// concern, not the caller's.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn schedule(&self, task: &NotificationTask) -> Result<(), ClientError>;
}

pub struct HttpNotificationSink {
    client: Client,
    api_url: String,
}

impl HttpNotificationSink {
    pub fn new(client: Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn schedule(&self, task: &NotificationTask) -> Result<(), ClientError> {
        let response = self.client.post(&self.api_url).json(task).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
