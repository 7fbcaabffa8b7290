use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::calendar::{CalendarEvent, EventType};

pub const DEFAULT_DURATION_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewFormat {
    #[default]
    Video,
    Phone,
    Onsite,
}

/// An interview extracted from an inbound request. `duration_minutes > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub proposed_time: DateTime<Utc>,
    pub interviewers: Vec<String>,
    pub format: InterviewFormat,
    pub platform: String,
    pub duration_minutes: u32,
    /// Address replies go to, when the request carried one.
    pub contact_email: Option<String>,
}

impl Interview {
    pub fn end_time(&self) -> DateTime<Utc> {
        self.proposed_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Reply recipient: the sender's address, else the company name.
    pub fn reply_to(&self) -> &str {
        self.contact_email.as_deref().unwrap_or(&self.company)
    }

    pub fn to_calendar_event(&self) -> CalendarEvent {
        CalendarEvent {
            title: format!("Interview with {}", self.company),
            start: self.proposed_time,
            end: self.end_time(),
            event_type: EventType::Interview,
        }
    }
}
