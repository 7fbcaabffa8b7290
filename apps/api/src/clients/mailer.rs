use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use super::{ensure_success, ClientError};
use crate::interview::email::Email;

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), ClientError>;
}

/// Sends mail through an HTTP email API (`POST {from,to,subject,body}`).
pub struct HttpEmailSender {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpEmailSender {
    pub fn new(client: Client, api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, email: &Email) -> Result<(), ClientError> {
        let mut request = self.client.post(&self.api_url).json(&OutboundEmail {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            body: &email.body,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        ensure_success(response).await?;
        info!("Sent email '{}' to {}", email.subject, email.to);
        Ok(())
    }
}
