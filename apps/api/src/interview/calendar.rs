//! Calendar conflict detection and alternative-slot search.

use std::str::FromStr;

use chrono::{DateTime, Days, Duration, FixedOffset, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::calendar::Calendar;

/// Days scanned by `find_alternatives`, starting today.
pub const SEARCH_DAYS: u64 = 14;
/// First and last candidate hour (inclusive), user-local.
pub const BUSINESS_HOURS: std::ops::RangeInclusive<u32> = 9..=16;
pub const MAX_ALTERNATIVES: usize = 3;

/// True unless `instant` falls inside `[start, end]` (inclusive) of any event.
pub fn is_available(instant: DateTime<Utc>, calendar: &Calendar) -> bool {
    !calendar
        .events
        .iter()
        .any(|event| instant >= event.start && instant <= event.end)
}

/// True unless `[start, end]` touches any event (inclusive bounds).
pub fn is_interval_free(start: DateTime<Utc>, end: DateTime<Utc>, calendar: &Calendar) -> bool {
    !calendar
        .events
        .iter()
        .any(|event| start <= event.end && event.start <= end)
}

/// How a proposed interview is tested against the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictCheck {
    /// Only the start instant is checked; an interview that starts in a gap
    /// but runs into a later event is not a conflict.
    #[default]
    StartInstant,
    /// The whole `[start, start + duration]` interval is checked.
    FullInterval,
}

impl FromStr for ConflictCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(ConflictCheck::StartInstant),
            "interval" => Ok(ConflictCheck::FullInterval),
            other => Err(format!("unknown conflict check '{other}' (expected start|interval)")),
        }
    }
}

/// Availability rules for one user: which check to apply and the wall-clock
/// offset that defines "business hours".
#[derive(Debug, Clone, Copy)]
pub struct ConflictResolver {
    pub check: ConflictCheck,
    pub offset: FixedOffset,
}

impl ConflictResolver {
    pub fn new(check: ConflictCheck, offset: FixedOffset) -> Self {
        Self { check, offset }
    }

    pub fn is_slot_free(
        &self,
        start: DateTime<Utc>,
        duration_minutes: u32,
        calendar: &Calendar,
    ) -> bool {
        match self.check {
            ConflictCheck::StartInstant => is_available(start, calendar),
            ConflictCheck::FullInterval => is_interval_free(
                start,
                start + Duration::minutes(i64::from(duration_minutes)),
                calendar,
            ),
        }
    }

    /// Up to three free slots on the hourly 09:00–16:00 grid over the next
    /// fourteen days, in chronological order. Unlike a plain scan of the
    /// grid, slots earlier than `now` are never offered, so today's elapsed
    /// hours are skipped even when the calendar shows them free.
    pub fn find_alternatives(
        &self,
        calendar: &Calendar,
        duration_minutes: u32,
        now: DateTime<Utc>,
    ) -> Vec<DateTime<Utc>> {
        let today = now.with_timezone(&self.offset).date_naive();

        (0..SEARCH_DAYS)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .flat_map(|day| BUSINESS_HOURS.map(move |hour| (day, hour)))
            .filter_map(|(day, hour)| {
                let local = day.and_time(NaiveTime::from_hms_opt(hour, 0, 0)?);
                self.offset
                    .from_local_datetime(&local)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            })
            .filter(|slot| *slot >= now)
            .filter(|slot| self.is_slot_free(*slot, duration_minutes, calendar))
            .take(MAX_ALTERNATIVES)
            .collect()
    }
}
