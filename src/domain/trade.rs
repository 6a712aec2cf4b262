//! Trade journal entries.
//!
//! One `Trade` is one logged trading event: its R-multiple result, optional
//! risk, free-text context labels, an optional strategy reference (with a
//! denormalized name snapshot so deleting the strategy later cannot blank
//! the journal), notes, and normalized tag / rule-break lists.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::id::{StrategyId, TradeId};
use crate::domain::rulebreak::RuleBreak;

/// A logged trading event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    /// Creation timestamp, epoch ms.
    pub created_at_ms: i64,
    /// Result as a signed R-multiple; positive = win, negative = loss,
    /// zero = breakeven.
    pub result_r: Decimal,
    /// Risk on the entry in R, when the trader recorded it.
    pub risk_r: Option<Decimal>,
    pub session: String,
    pub timeframe: String,
    pub bias: String,
    pub strategy_id: Option<StrategyId>,
    /// Name snapshot taken at entry time; survives strategy deletion.
    pub strategy_name: Option<String>,
    pub notes: String,
    /// Normalized, de-duplicated, first-seen-ordered tag codes.
    pub tags: Vec<String>,
    pub rule_breaks: Vec<RuleBreak>,
}

impl Trade {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.result_r > Decimal::ZERO
    }

    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.result_r < Decimal::ZERO
    }

    /// Stamp a rule break, keeping the list de-duplicated.
    pub fn stamp_rule_break(&mut self, code: RuleBreak) {
        if !self.rule_breaks.contains(&code) {
            self.rule_breaks.push(code);
        }
    }
}

/// Normalize one tag into its UPPER_SNAKE short-code form.
#[must_use]
pub fn normalize_tag(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            _ => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Parse a comma-separated tag list into de-duplicated, order-preserving,
/// normalized codes.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for part in raw.split(',') {
        let tag = normalize_tag(part);
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Format tags back into the comma-separated storage form.
#[must_use]
pub fn format_tags(tags: &[String]) -> String {
    tags.join(",")
}
