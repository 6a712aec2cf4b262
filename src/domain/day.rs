//! Calendar day keys and day windows.
//!
//! A day key is the zero-padded local calendar date (`YYYY-MM-DD`) a journal
//! row belongs to. Trades are bucketed by converting a day key plus the
//! device's UTC offset into an epoch-millisecond window; the offset is always
//! injected by the caller so the bucketing stays testable.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A local calendar day (`YYYY-MM-DD`, zero-padded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Day key of the calendar day `at` falls on, in `at`'s own offset.
    #[must_use]
    pub fn from_datetime(at: &DateTime<FixedOffset>) -> Self {
        Self(at.date_naive())
    }

    /// The previous calendar day.
    ///
    /// `NaiveDate` covers ±262000 years, so stepping one day back cannot
    /// fail for any date a journal will ever hold.
    #[must_use]
    pub fn prev(&self) -> Self {
        Self(self.0 - Days::new(1))
    }

    /// Epoch-ms window `[00:00:00.000, next-day 00:00)` for this day in the
    /// given UTC offset.
    #[must_use]
    pub fn window(&self, offset: FixedOffset) -> DayWindow {
        let start = midnight_ms(self.0, offset);
        let end = midnight_ms(self.0 + Days::new(1), offset);
        DayWindow {
            start_ms: start,
            end_ms: end,
        }
    }
}

fn midnight_ms(date: NaiveDate, offset: FixedOffset) -> i64 {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    // A fixed offset maps every local datetime to exactly one instant.
    match midnight.and_local_timezone(offset) {
        chrono::LocalResult::Single(dt) => dt.timestamp_millis(),
        _ => 0,
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DomainError::InvalidDayKey {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for DayKey {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DayKey> for String {
    fn from(day: DayKey) -> Self {
        day.to_string()
    }
}

/// Half-open epoch-millisecond range covering one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayWindow {
    #[must_use]
    pub fn contains(&self, ms: i64) -> bool {
        self.start_ms <= ms && ms < self.end_ms
    }
}
