//! Rule-break codes and their normalization.
//!
//! Rule breaks are stamped onto trades by the entry flow (and by hand via
//! `trade tag`) and stored as a comma-separated list of short codes. The code
//! set is closed; a normalization map absorbs legacy and alternate spellings
//! so old journals keep parsing into the same set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of discipline rule-break codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleBreak {
    /// Traded without a daily plan for the session.
    PlanMissing,
    /// Traded without having closed out the previous session.
    CloseoutMissing,
    /// Kept trading past the daily trade cap.
    MaxTradesHit,
    /// Kept trading past the daily loss limit.
    MaxDailyLossHit,
    /// Kept trading through a losing streak at the cap.
    ConsecLossesHit,
    /// Trade was logged while an emergency override was active.
    OverrideUsed,
    /// Trade was taken while the gate had it blocked.
    TradeBlockedGate,
    /// Risk input on the entry was unparseable or missing.
    InvalidRiskInput,
    /// Anything that does not map onto a known code.
    Other,
}

impl RuleBreak {
    /// Deterministic storage code for this rule break.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PlanMissing => "PLAN_MISSING",
            Self::CloseoutMissing => "CLOSEOUT_MISSING",
            Self::MaxTradesHit => "MAX_TRADES_HIT",
            Self::MaxDailyLossHit => "MAX_DAILY_LOSS_HIT",
            Self::ConsecLossesHit => "CONSEC_LOSSES_HIT",
            Self::OverrideUsed => "OVERRIDE_USED",
            Self::TradeBlockedGate => "TRADE_BLOCKED_GATE",
            Self::InvalidRiskInput => "INVALID_RISK_INPUT",
            Self::Other => "OTHER",
        }
    }

    /// Normalize one raw code into the closed set.
    ///
    /// Absorbs legacy spellings from earlier journal exports; anything
    /// unrecognized collapses to [`RuleBreak::Other`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match canonical(raw).as_str() {
            "PLAN_MISSING" | "NO_PLAN" | "MISSING_PLAN" => Self::PlanMissing,
            "CLOSEOUT_MISSING" | "NO_CLOSEOUT" | "MISSING_CLOSEOUT" | "NO_REVIEW" => {
                Self::CloseoutMissing
            }
            "MAX_TRADES_HIT" | "MAX_TRADES" | "TOO_MANY_TRADES" | "OVERTRADING" => {
                Self::MaxTradesHit
            }
            "MAX_DAILY_LOSS_HIT" | "MAX_DAILY_LOSS" | "MAX_LOSS" | "LOSS_LIMIT" => {
                Self::MaxDailyLossHit
            }
            "CONSEC_LOSSES_HIT" | "CONSEC_LOSSES" | "CONSECUTIVE_LOSSES" | "LOSS_STREAK" => {
                Self::ConsecLossesHit
            }
            "OVERRIDE_USED" | "OVERRIDE" => Self::OverrideUsed,
            "TRADE_BLOCKED_GATE" | "GATE_BLOCKED" | "TRADED_WHILE_BLOCKED" => {
                Self::TradeBlockedGate
            }
            "INVALID_RISK_INPUT" | "BAD_RISK_INPUT" | "NO_RISK" => Self::InvalidRiskInput,
            _ => Self::Other,
        }
    }

    /// Parse a comma-separated storage string into a de-duplicated,
    /// first-seen-ordered list of codes.
    #[must_use]
    pub fn parse_list(raw: &str) -> Vec<Self> {
        let mut seen = Vec::new();
        for part in raw.split(',') {
            if part.trim().is_empty() {
                continue;
            }
            let code = Self::normalize(part);
            if !seen.contains(&code) {
                seen.push(code);
            }
        }
        seen
    }

    /// Format a list of codes back into the comma-separated storage form.
    #[must_use]
    pub fn format_list(codes: &[Self]) -> String {
        let mut out: Vec<&str> = Vec::new();
        for code in codes {
            if !out.contains(&code.code()) {
                out.push(code.code());
            }
        }
        out.join(",")
    }
}

impl fmt::Display for RuleBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Upper/underscore canonical form of a raw code.
fn canonical(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            _ => c.to_ascii_uppercase(),
        })
        .collect()
}
