//! The discipline gate.
//!
//! A pure evaluator: typed settings plus today's aggregates in, one decision
//! object out. Nothing here touches storage or the clock; the app layer
//! loads fresh inputs for every call and the result is never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::rulebreak::RuleBreak;
use crate::domain::settings::{AppMode, GateSettings};
use crate::domain::stats::DayStats;

/// Presence of the daily discipline rows the gate consumes.
///
/// `plan_done` refers to today's plan; `closeout_done` to yesterday's
/// closeout. The asymmetry is deliberate: the plan is for the session about
/// to be traded, the closeout should have wrapped up the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub plan_done: bool,
    pub closeout_done: bool,
}

/// Limits echoed back for display, so consumers never re-read settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoedLimits {
    pub max_trades_per_day: i64,
    pub max_daily_loss_r: rust_decimal::Decimal,
    pub max_consecutive_losses: i64,
    pub require_daily_plan: bool,
    pub require_daily_closeout: bool,
}

impl From<&GateSettings> for EchoedLimits {
    fn from(settings: &GateSettings) -> Self {
        Self {
            max_trades_per_day: settings.max_trades_per_day,
            max_daily_loss_r: settings.max_daily_loss_r,
            max_consecutive_losses: settings.max_consecutive_losses,
            require_daily_plan: settings.require_daily_plan,
            require_daily_closeout: settings.require_daily_closeout,
        }
    }
}

/// The gate's full answer for "right now".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    pub can_trade: bool,
    /// Human-readable hard-block explanations, one per violated limit.
    pub reasons: Vec<String>,
    pub mode: AppMode,
    pub override_active: bool,
    pub override_until_ms: i64,
    pub override_cooldown_until_ms: i64,
    /// Advisory codes; these annotate but never block.
    pub soft_warnings: Vec<RuleBreak>,
    pub requirements: Requirements,
    pub stats: DayStats,
    pub limits: EchoedLimits,
}

impl GateDecision {
    /// True when the decision is blocked on hard limits (not merely warned).
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.can_trade
    }
}

/// Evaluate the gate for the instant `now_ms`.
///
/// Demo mode short-circuits to fully permitted: no reasons, no warnings,
/// requirements reported done so dashboards show nothing stale, while stats
/// and limits are still returned for display.
#[must_use]
pub fn evaluate(
    settings: &GateSettings,
    stats: &DayStats,
    requirements: Requirements,
    now_ms: i64,
) -> GateDecision {
    if !settings.mode.is_real() {
        return GateDecision {
            can_trade: true,
            reasons: Vec::new(),
            mode: settings.mode,
            override_active: false,
            override_until_ms: settings.override_until_ms,
            override_cooldown_until_ms: settings.override_cooldown_until_ms,
            soft_warnings: Vec::new(),
            requirements: Requirements {
                plan_done: true,
                closeout_done: true,
            },
            stats: stats.clone(),
            limits: EchoedLimits::from(settings),
        };
    }

    let override_active = now_ms < settings.override_until_ms;

    let mut soft_warnings = Vec::new();
    if settings.require_daily_plan && !requirements.plan_done {
        soft_warnings.push(RuleBreak::PlanMissing);
    }
    if settings.require_daily_closeout && !requirements.closeout_done {
        soft_warnings.push(RuleBreak::CloseoutMissing);
    }

    let mut reasons = Vec::new();
    if settings.max_trades_per_day > 0 && i64::from(stats.trade_count) >= settings.max_trades_per_day
    {
        reasons.push(format!(
            "max trades per day reached ({}/{})",
            stats.trade_count, settings.max_trades_per_day
        ));
    }
    // Inclusive boundary: landing exactly on the limit blocks.
    if settings.max_daily_loss_r > rust_decimal::Decimal::ZERO
        && stats.sum_r <= -settings.max_daily_loss_r
    {
        reasons.push(format!(
            "daily loss limit hit ({}R, limit -{}R)",
            stats.sum_r, settings.max_daily_loss_r
        ));
    }
    if settings.max_consecutive_losses > 0
        && i64::from(stats.consecutive_losses) >= settings.max_consecutive_losses
    {
        reasons.push(format!(
            "{} consecutive losses (limit {})",
            stats.consecutive_losses, settings.max_consecutive_losses
        ));
    }

    GateDecision {
        can_trade: override_active || reasons.is_empty(),
        reasons,
        mode: settings.mode,
        override_active,
        override_until_ms: settings.override_until_ms,
        override_cooldown_until_ms: settings.override_cooldown_until_ms,
        soft_warnings,
        requirements,
        stats: stats.clone(),
        limits: EchoedLimits::from(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const NOW: i64 = 1_754_500_000_000;

    fn real_settings() -> GateSettings {
        GateSettings {
            mode: AppMode::Real,
            ..GateSettings::default()
        }
    }

    fn done() -> Requirements {
        Requirements {
            plan_done: true,
            closeout_done: true,
        }
    }

    fn stats(trade_count: u32, sum_r: rust_decimal::Decimal, streak: u32) -> DayStats {
        DayStats {
            trade_count,
            sum_r,
            consecutive_losses: streak,
            ..DayStats::default()
        }
    }

    // -------------------------------------------------------------------------
    // Demo mode
    // -------------------------------------------------------------------------

    #[test]
    fn demo_mode_bypasses_everything() {
        let settings = GateSettings {
            mode: AppMode::Demo,
            override_until_ms: NOW + 1,
            ..GateSettings::default()
        };
        // Way past every limit, nothing planned, nothing closed out.
        let decision = evaluate(
            &settings,
            &stats(10, dec!(-50), 10),
            Requirements {
                plan_done: false,
                closeout_done: false,
            },
            NOW,
        );

        assert!(decision.can_trade);
        assert!(decision.reasons.is_empty());
        assert!(decision.soft_warnings.is_empty());
        assert!(!decision.override_active);
        assert!(decision.requirements.plan_done);
        assert!(decision.requirements.closeout_done);
        // Stats and limits still come back for display.
        assert_eq!(decision.stats.trade_count, 10);
        assert_eq!(decision.limits.max_trades_per_day, 3);
    }

    // -------------------------------------------------------------------------
    // Hard limits
    // -------------------------------------------------------------------------

    #[test]
    fn trade_count_at_limit_blocks() {
        let decision = evaluate(&real_settings(), &stats(3, dec!(1), 0), done(), NOW);
        assert!(!decision.can_trade);
        assert_eq!(decision.reasons.len(), 1);
        assert!(decision.reasons[0].contains("max trades"));

        let decision = evaluate(&real_settings(), &stats(2, dec!(1), 0), done(), NOW);
        assert!(decision.can_trade);
    }

    #[test]
    fn loss_limit_boundary_is_inclusive() {
        let blocked = evaluate(&real_settings(), &stats(1, dec!(-2), 0), done(), NOW);
        assert!(!blocked.can_trade);
        assert!(blocked.reasons[0].contains("loss limit"));

        let open = evaluate(&real_settings(), &stats(1, dec!(-1.99), 0), done(), NOW);
        assert!(open.can_trade);
    }

    #[test]
    fn losing_streak_at_limit_blocks() {
        let decision = evaluate(&real_settings(), &stats(2, dec!(-1), 2), done(), NOW);
        assert!(!decision.can_trade);
        assert!(decision.reasons[0].contains("consecutive losses"));
    }

    #[test]
    fn violated_limits_each_report_their_own_reason() {
        let settings = real_settings();
        let decision = evaluate(&settings, &stats(5, dec!(-4), 5), done(), NOW);
        assert!(!decision.can_trade);
        assert_eq!(decision.reasons.len(), 3);
    }

    #[test]
    fn nonpositive_limits_disable_their_rule() {
        let settings = GateSettings {
            max_trades_per_day: 0,
            max_daily_loss_r: dec!(0),
            max_consecutive_losses: -1,
            ..real_settings()
        };
        let decision = evaluate(&settings, &stats(100, dec!(-40), 30), done(), NOW);
        assert!(decision.can_trade);
        assert!(decision.reasons.is_empty());
    }

    // -------------------------------------------------------------------------
    // Soft warnings
    // -------------------------------------------------------------------------

    #[test]
    fn missing_plan_warns_but_never_blocks() {
        let decision = evaluate(
            &real_settings(),
            &stats(0, dec!(0), 0),
            Requirements {
                plan_done: false,
                closeout_done: true,
            },
            NOW,
        );
        assert!(decision.can_trade);
        assert_eq!(decision.soft_warnings, vec![RuleBreak::PlanMissing]);
    }

    #[test]
    fn missing_closeout_warns_after_missing_plan() {
        let decision = evaluate(
            &real_settings(),
            &stats(0, dec!(0), 0),
            Requirements {
                plan_done: false,
                closeout_done: false,
            },
            NOW,
        );
        assert_eq!(
            decision.soft_warnings,
            vec![RuleBreak::PlanMissing, RuleBreak::CloseoutMissing]
        );
    }

    #[test]
    fn disabled_requirements_do_not_warn() {
        let settings = GateSettings {
            require_daily_plan: false,
            require_daily_closeout: false,
            ..real_settings()
        };
        let decision = evaluate(
            &settings,
            &stats(0, dec!(0), 0),
            Requirements {
                plan_done: false,
                closeout_done: false,
            },
            NOW,
        );
        assert!(decision.soft_warnings.is_empty());
    }

    // -------------------------------------------------------------------------
    // Override
    // -------------------------------------------------------------------------

    #[test]
    fn active_override_bypasses_all_hard_limits() {
        let settings = GateSettings {
            override_until_ms: NOW + 60_000,
            ..real_settings()
        };
        let decision = evaluate(&settings, &stats(5, dec!(-4), 5), done(), NOW);
        assert!(decision.override_active);
        assert!(decision.can_trade);
        // The reasons are still reported so the UI can show what is bypassed.
        assert_eq!(decision.reasons.len(), 3);
    }

    #[test]
    fn expired_override_no_longer_bypasses() {
        let settings = GateSettings {
            override_until_ms: NOW,
            ..real_settings()
        };
        let decision = evaluate(&settings, &stats(3, dec!(0), 0), done(), NOW);
        assert!(!decision.override_active);
        assert!(!decision.can_trade);
    }

    #[test]
    fn override_does_not_suppress_soft_warnings() {
        let settings = GateSettings {
            override_until_ms: NOW + 60_000,
            ..real_settings()
        };
        let decision = evaluate(
            &settings,
            &stats(0, dec!(0), 0),
            Requirements {
                plan_done: false,
                closeout_done: true,
            },
            NOW,
        );
        assert!(decision.can_trade);
        assert_eq!(decision.soft_warnings, vec![RuleBreak::PlanMissing]);
    }
}
