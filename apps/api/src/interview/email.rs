use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::models::Interview;

const DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

impl EmailTemplate {
    fn new(subject: &str, body: &str) -> Self {
        Self {
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }
}

/// The outbound template table. Built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplates {
    /// Placeholder: `{datetime}`.
    pub accept: EmailTemplate,
    /// Placeholder: `{availableTimes}`.
    pub reschedule: EmailTemplate,
    /// Placeholder: `{position}`.
    pub follow_up: EmailTemplate,
}

impl Default for EmailTemplates {
    fn default() -> Self {
        Self {
            accept: EmailTemplate::new(
                "Interview Confirmation",
                "Thank you for the interview invitation. I confirm my availability for {datetime}.",
            ),
            reschedule: EmailTemplate::new(
                "Interview Reschedule Request",
                "I would like to reschedule the interview. Here are my available times: {availableTimes}",
            ),
            follow_up: EmailTemplate::new(
                "Interview Follow-up",
                "Thank you for taking the time to meet with me regarding the {position} role.",
            ),
        }
    }
}

impl EmailTemplates {
    /// Loads a full template table from a JSON file with
    /// `accept`, `reschedule` and `follow_up` entries.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read email templates from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid email template file {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Fills templates for interview correspondence. Times render in the
/// user's wall-clock offset.
#[derive(Debug, Clone)]
pub struct EmailComposer<'a> {
    templates: &'a EmailTemplates,
    offset: FixedOffset,
}

impl<'a> EmailComposer<'a> {
    pub fn new(templates: &'a EmailTemplates, offset: FixedOffset) -> Self {
        Self { templates, offset }
    }

    pub fn format_time(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format(DATETIME_FORMAT)
            .to_string()
    }

    pub fn compose_confirmation(&self, interview: &Interview) -> Email {
        let template = &self.templates.accept;
        Email {
            to: interview.reply_to().to_string(),
            subject: template.subject.clone(),
            body: template
                .body
                .replace("{datetime}", &self.format_time(interview.proposed_time)),
        }
    }

    /// Alternatives are listed one per line in the order given.
    pub fn compose_reschedule(&self, interview: &Interview, alternatives: &[DateTime<Utc>]) -> Email {
        let template = &self.templates.reschedule;
        let times = alternatives
            .iter()
            .map(|t| self.format_time(*t))
            .collect::<Vec<_>>()
            .join("\n");
        Email {
            to: interview.reply_to().to_string(),
            subject: template.subject.clone(),
            body: template.body.replace("{availableTimes}", &times),
        }
    }

    pub fn compose_follow_up(&self, to: &str, position: &str) -> Email {
        let template = &self.templates.follow_up;
        Email {
            to: to.to_string(),
            subject: template.subject.clone(),
            body: template.body.replace("{position}", position),
        }
    }
}
