//! Daily plans and daily closeouts.
//!
//! At most one of each exists per calendar day; re-saving overwrites. The
//! gate only ever consumes their presence, but both carry enough content to
//! be worth journaling on their own.

use serde::{Deserialize, Serialize};

use crate::domain::day::DayKey;
use crate::domain::error::DomainError;

/// The plan written before the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub day: DayKey,
    pub bias: String,
    /// High-impact news expected; trade smaller or stand aside.
    pub news_caution: bool,
    pub key_levels: String,
    pub scenarios: String,
    pub created_at_ms: i64,
}

/// The review written after the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCloseout {
    pub day: DayKey,
    pub mood: Mood,
    pub grade: String,
    pub review: String,
    pub created_at_ms: i64,
}

/// Mood on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Mood(u8);

impl Mood {
    pub fn try_new(mood: i64) -> Result<Self, DomainError> {
        if (1..=5).contains(&mood) {
            Ok(Self(mood as u8))
        } else {
            Err(DomainError::MoodOutOfRange { mood })
        }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Mood {
    type Error = DomainError;

    fn try_from(mood: i64) -> Result<Self, Self::Error> {
        Self::try_new(mood)
    }
}

impl From<Mood> for i64 {
    fn from(mood: Mood) -> Self {
        i64::from(mood.0)
    }
}
