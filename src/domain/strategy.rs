//! Reusable trade strategies.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::id::StrategyId;

/// Instrument grouping a strategy applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarketTag {
    Gold,
    Us30,
    #[default]
    Both,
}

impl MarketTag {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gold => "gold",
            Self::Us30 => "us30",
            Self::Both => "both",
        }
    }

    /// Storage form back to the enum; unknown values read as `Both` so a
    /// hand-edited database row cannot make a strategy unloadable.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "gold" => Self::Gold,
            "us30" => Self::Us30,
            _ => Self::Both,
        }
    }
}

impl std::fmt::Display for MarketTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, reusable trade definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: StrategyId,
    pub name: String,
    pub market: MarketTag,
    pub styles: Vec<String>,
    pub timeframes: Vec<String>,
    pub description: String,
    pub checklist: String,
    pub image_ref: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Strategy {
    /// Create a strategy, validating that it carries a name.
    pub fn try_new(
        name: impl Into<String>,
        market: MarketTag,
        created_at_ms: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyStrategyName);
        }
        Ok(Self {
            id: StrategyId::new(),
            name,
            market,
            styles: Vec::new(),
            timeframes: Vec::new(),
            description: String::new(),
            checklist: String::new(),
            image_ref: None,
            created_at_ms,
            updated_at_ms: created_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_requires_a_name() {
        assert!(matches!(
            Strategy::try_new("  ", MarketTag::Gold, 0),
            Err(DomainError::EmptyStrategyName)
        ));
        assert!(Strategy::try_new("London sweep", MarketTag::Gold, 0).is_ok());
    }

    #[test]
    fn market_tag_round_trips_and_tolerates_unknowns() {
        assert_eq!(MarketTag::from_raw("gold"), MarketTag::Gold);
        assert_eq!(MarketTag::from_raw("us30"), MarketTag::Us30);
        assert_eq!(MarketTag::from_raw("both"), MarketTag::Both);
        assert_eq!(MarketTag::from_raw("es"), MarketTag::Both);
    }
}
