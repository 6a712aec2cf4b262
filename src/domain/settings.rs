//! Typed gate settings over the string key/value settings store.
//!
//! Settings are persisted as strings and re-read on every evaluation; this
//! module is the one place where that stringiness is parsed. Every field
//! falls back to its documented default explicitly - a malformed value can
//! never turn into an accidental "0 = unlimited".

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settings keys as stored in the settings table.
pub mod keys {
    pub const APP_MODE: &str = "appMode";
    pub const OVERRIDE_UNTIL: &str = "gateOverrideUntil";
    pub const OVERRIDE_COOLDOWN_UNTIL: &str = "gateOverrideCooldownUntil";
    pub const MAX_TRADES_PER_DAY: &str = "maxTradesPerDay";
    pub const MAX_DAILY_LOSS_R: &str = "maxDailyLossR";
    pub const MAX_CONSECUTIVE_LOSSES: &str = "maxConsecutiveLosses";
    pub const REQUIRE_DAILY_PLAN: &str = "requireDailyPlan";
    pub const REQUIRE_DAILY_CLOSEOUT: &str = "requireDailyCloseout";
}

/// Application mode: demo never blocks, real enforces the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Demo,
    Real,
}

impl AppMode {
    /// Storage form. Anything other than exactly `"real"` reads back as demo.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Real => "real",
        }
    }

    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("real") => Self::Real,
            _ => Self::Demo,
        }
    }

    #[must_use]
    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real)
    }
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed view of the discipline-gate settings.
///
/// A limit value <= 0 disables that rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSettings {
    pub mode: AppMode,
    /// Epoch ms; the override is active while `now < override_until_ms`.
    pub override_until_ms: i64,
    /// Epoch ms; activation is blocked while `now < override_cooldown_until_ms`.
    pub override_cooldown_until_ms: i64,
    pub max_trades_per_day: i64,
    pub max_daily_loss_r: Decimal,
    pub max_consecutive_losses: i64,
    pub require_daily_plan: bool,
    pub require_daily_closeout: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            mode: AppMode::Demo,
            override_until_ms: 0,
            override_cooldown_until_ms: 0,
            max_trades_per_day: 3,
            max_daily_loss_r: Decimal::TWO,
            max_consecutive_losses: 2,
            require_daily_plan: true,
            require_daily_closeout: true,
        }
    }
}

impl GateSettings {
    /// Build typed settings from the raw key/value map, field by field.
    #[must_use]
    pub fn from_map(raw: &HashMap<String, String>) -> Self {
        let get = |key: &str| raw.get(key).map(String::as_str);
        let defaults = Self::default();

        Self {
            mode: AppMode::from_raw(get(keys::APP_MODE)),
            override_until_ms: parse_i64_or(get(keys::OVERRIDE_UNTIL), defaults.override_until_ms),
            override_cooldown_until_ms: parse_i64_or(
                get(keys::OVERRIDE_COOLDOWN_UNTIL),
                defaults.override_cooldown_until_ms,
            ),
            max_trades_per_day: parse_i64_or(
                get(keys::MAX_TRADES_PER_DAY),
                defaults.max_trades_per_day,
            ),
            max_daily_loss_r: parse_decimal_or(
                get(keys::MAX_DAILY_LOSS_R),
                defaults.max_daily_loss_r,
            ),
            max_consecutive_losses: parse_i64_or(
                get(keys::MAX_CONSECUTIVE_LOSSES),
                defaults.max_consecutive_losses,
            ),
            require_daily_plan: parse_bool_or(
                get(keys::REQUIRE_DAILY_PLAN),
                defaults.require_daily_plan,
            ),
            require_daily_closeout: parse_bool_or(
                get(keys::REQUIRE_DAILY_CLOSEOUT),
                defaults.require_daily_closeout,
            ),
        }
    }
}

/// Parse an integer setting, falling back to the field's documented default.
#[must_use]
pub fn parse_i64_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// Parse a decimal setting, falling back to the field's documented default.
#[must_use]
pub fn parse_decimal_or(raw: Option<&str>, default: Decimal) -> Decimal {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// Parse a boolean setting: `"1"`/`"true"` are true, any other present value
/// is false, absence is the default.
#[must_use]
pub fn parse_bool_or(raw: Option<&str>, default: bool) -> bool {
    match raw {
        Some(s) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        None => default,
    }
}
