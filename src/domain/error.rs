//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and parsing helpers
//! that validate domain rules before anything reaches storage.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An R-multiple input failed to parse; rejected before insert.
    #[error("invalid R-multiple {input:?}: {reason}")]
    InvalidResultR {
        /// The raw input that was provided.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Closeout mood must be within the 1-5 scale.
    #[error("mood must be between 1 and 5, got {mood}")]
    MoodOutOfRange {
        /// The invalid mood that was provided.
        mood: i64,
    },

    /// Day keys must be zero-padded `YYYY-MM-DD` calendar dates.
    #[error("invalid day key {input:?}")]
    InvalidDayKey {
        /// The raw input that was provided.
        input: String,
    },

    /// Strategies must be named.
    #[error("strategy name cannot be empty")]
    EmptyStrategyName,

    /// A referenced strategy does not exist.
    #[error("no strategy matches {reference:?}")]
    UnknownStrategy {
        /// The id or name the caller supplied.
        reference: String,
    },
}
