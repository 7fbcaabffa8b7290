//! Pattern rules that turn an inbound interview request into an [`Interview`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use super::models::{Interview, InterviewFormat, DEFAULT_DURATION_MINUTES};
use crate::extract::StructuredExtractor;

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").expect("valid date regex")
});
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*(AM|PM)\b").expect("valid time regex")
});
static POSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfor (?:the |a |an )?([A-Za-z][\w /+#-]*?) (?:position|role)\b")
        .expect("valid position regex")
});
static COMPANY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bat ([A-Z][A-Za-z0-9&]*(?: [A-Z][A-Za-z0-9&]*)*)").expect("valid company regex")
});
static SENDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^from:[^\n]*?([A-Za-z0-9._%+-]+@([A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+))")
        .expect("valid sender regex")
});
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)[ -]?(minutes?|mins?|hours?|hrs?)\b").expect("valid duration regex")
});
static INTERVIEWERS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\bwith ([A-Z][a-z]+ [A-Z][a-z]+(?:(?:, ?| and |, and )[A-Z][a-z]+ [A-Z][a-z]+)*)",
    )
    .expect("valid interviewers regex")
});
static PERSON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+ [A-Z][a-z]+").expect("valid person regex"));
static ONSITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:on-?site|in[ -]person)\b").expect("valid onsite regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bphone\b").expect("valid phone regex"));
static PLATFORM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(zoom|google meet|microsoft teams|webex)\b").expect("valid platform regex")
});

const DEFAULT_HOUR: u32 = 9;

/// Extracts interview details from free text. Fields the rules cannot find
/// come back empty; a missing or invalid date means "now".
pub struct InterviewRequestExtractor {
    pub now: DateTime<Utc>,
    /// Wall-clock offset the message's dates and times are read in.
    pub offset: FixedOffset,
}

impl InterviewRequestExtractor {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { now, offset }
    }

    fn proposed_time(&self, input: &str) -> DateTime<Utc> {
        let Some(date) = DATE_RE.captures(input).and_then(|c| {
            NaiveDate::from_ymd_opt(c[3].parse().ok()?, c[1].parse().ok()?, c[2].parse().ok()?)
        }) else {
            return self.now;
        };

        let time = TIME_RE
            .captures(input)
            .and_then(|c| {
                let hour: u32 = c[1].parse().ok()?;
                let minute: u32 = c[2].parse().ok()?;
                if !(1..=12).contains(&hour) {
                    return None;
                }
                let pm = c[3].eq_ignore_ascii_case("pm");
                NaiveTime::from_hms_opt(hour % 12 + if pm { 12 } else { 0 }, minute, 0)
            })
            .or_else(|| NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0));

        time.and_then(|t| self.offset.from_local_datetime(&date.and_time(t)).single())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(self.now)
    }
}

fn capture(re: &Regex, input: &str) -> Option<String> {
    re.captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// "recruiting@mail.initech.com" -> "Initech"
fn company_from_domain(domain: &str) -> Option<String> {
    let labels: Vec<&str> = domain.split('.').collect();
    let name = labels.len().checked_sub(2).map(|i| labels[i])?;
    let mut chars = name.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

fn duration_minutes(input: &str) -> u32 {
    DURATION_RE
        .captures(input)
        .and_then(|c| {
            let amount: u32 = c[1].parse().ok()?;
            if c[2].to_ascii_lowercase().starts_with('h') {
                amount.checked_mul(60)
            } else {
                Some(amount)
            }
        })
        .filter(|minutes| *minutes > 0)
        .unwrap_or(DEFAULT_DURATION_MINUTES)
}

fn platform(input: &str) -> String {
    let Some(found) = capture(&PLATFORM_RE, input) else {
        return String::new();
    };
    match found.to_ascii_lowercase().as_str() {
        "zoom" => "Zoom",
        "google meet" => "Google Meet",
        "microsoft teams" => "Microsoft Teams",
        _ => "Webex",
    }
    .to_string()
}

impl StructuredExtractor for InterviewRequestExtractor {
    type Output = Interview;

    fn extract(&self, input: &str) -> Interview {
        let sender = SENDER_RE.captures(input);
        let contact_email = sender.as_ref().map(|c| c[1].to_string());

        let company = capture(&COMPANY_RE, input)
            .or_else(|| sender.as_ref().and_then(|c| company_from_domain(&c[2])))
            .unwrap_or_default();

        let interviewers = INTERVIEWERS_RE
            .captures(input)
            .map(|c| {
                PERSON_RE
                    .find_iter(&c[1])
                    .map(|m| m.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let format = if ONSITE_RE.is_match(input) {
            InterviewFormat::Onsite
        } else if PHONE_RE.is_match(input) {
            InterviewFormat::Phone
        } else {
            InterviewFormat::Video
        };

        Interview {
            id: Uuid::new_v4(),
            company,
            position: capture(&POSITION_RE, input).unwrap_or_default(),
            proposed_time: self.proposed_time(input),
            interviewers,
            format,
            platform: platform(input),
            duration_minutes: duration_minutes(input),
            contact_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = "From: Sarah Connor <sarah@cyberdyne.io>
Subject: Interview invitation

Hi Jane,

We'd like to invite you to interview for the Senior Rust Engineer position at Cyberdyne Systems.
Are you available on 3/12/2026 at 2:30 PM? The call will take 45 minutes on Zoom with Miles Dyson and Kyle Reese.
";

    fn extractor(offset_secs: i32) -> InterviewRequestExtractor {
        InterviewRequestExtractor::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
            FixedOffset::east_opt(offset_secs).unwrap(),
        )
    }

    #[test]
    fn test_extracts_full_request() {
        let interview = extractor(0).extract(REQUEST);
        assert_eq!(interview.company, "Cyberdyne Systems");
        assert_eq!(interview.position, "Senior Rust Engineer");
        assert_eq!(
            interview.proposed_time,
            Utc.with_ymd_and_hms(2026, 3, 12, 14, 30, 0).unwrap()
        );
        assert_eq!(interview.duration_minutes, 45);
        assert_eq!(interview.platform, "Zoom");
        assert_eq!(interview.format, InterviewFormat::Video);
        assert_eq!(interview.interviewers, vec!["Miles Dyson", "Kyle Reese"]);
        assert_eq!(interview.contact_email.as_deref(), Some("sarah@cyberdyne.io"));
    }

    #[test]
    fn test_time_is_read_in_user_offset() {
        let interview = extractor(2 * 3600).extract(REQUEST);
        assert_eq!(
            interview.proposed_time,
            Utc.with_ymd_and_hms(2026, 3, 12, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_unmatched_fields_fail_open() {
        let extractor = extractor(0);
        let interview = extractor.extract("Can we talk sometime?");
        assert_eq!(interview.company, "");
        assert_eq!(interview.position, "");
        assert_eq!(interview.proposed_time, extractor.now);
        assert_eq!(interview.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert!(interview.interviewers.is_empty());
        assert_eq!(interview.platform, "");
        assert!(interview.contact_email.is_none());
    }

    #[test]
    fn test_invalid_date_means_now() {
        let extractor = extractor(0);
        let interview = extractor.extract("How about 13/45/2026 at 10:00 AM?");
        assert_eq!(interview.proposed_time, extractor.now);
    }

    #[test]
    fn test_date_without_time_defaults_to_morning() {
        let interview = extractor(0).extract("Please come onsite on 4/2/2026 for 2 hours.");
        assert_eq!(
            interview.proposed_time,
            Utc.with_ymd_and_hms(2026, 4, 2, 9, 0, 0).unwrap()
        );
        assert_eq!(interview.format, InterviewFormat::Onsite);
        assert_eq!(interview.duration_minutes, 120);
    }

    #[test]
    fn test_company_falls_back_to_sender_domain() {
        let interview = extractor(0)
            .extract("From: recruiting@mail.initech.com\n\nPlease join us for a phone interview.");
        assert_eq!(interview.company, "Initech");
        assert_eq!(interview.format, InterviewFormat::Phone);
        assert_eq!(
            interview.contact_email.as_deref(),
            Some("recruiting@mail.initech.com")
        );
    }

    #[test]
    fn test_zero_duration_falls_back_to_default() {
        let interview = extractor(0).extract("It will take 0 minutes.");
        assert_eq!(interview.duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_each_extraction_gets_fresh_id() {
        let extractor = extractor(0);
        assert_ne!(extractor.extract(REQUEST).id, extractor.extract(REQUEST).id);
    }
}
