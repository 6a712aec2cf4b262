//! Handler for the `status` command: the discipline dashboard.

use chrono::TimeZone;

use crate::adapter::inbound::cli::{operator::Operator, output};
use crate::domain::gate::GateDecision;
use crate::domain::settings::AppMode;
use crate::error::Result;

/// Execute the status command.
pub async fn execute(operator: &Operator) -> Result<()> {
    let decision = operator.gate().evaluate().await?;

    if output::is_json() {
        output::json_result("status", serde_json::to_value(&decision)?);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    render_decision(&decision);
    Ok(())
}

/// Render a gate decision as the human dashboard.
pub fn render_decision(decision: &GateDecision) {
    let mode = match decision.mode {
        AppMode::Demo => output::muted("demo (gate bypassed)"),
        AppMode::Real => "real".to_string(),
    };
    output::field("Mode", mode);

    let gate = if decision.override_active {
        output::attention("OVERRIDE")
    } else if decision.is_locked() {
        output::negative("LOCKED")
    } else {
        output::positive("OPEN")
    };
    output::field("Gate", gate);

    for reason in &decision.reasons {
        output::line(&format!("{} {}", output::negative("•"), reason));
    }
    for warning in &decision.soft_warnings {
        output::warning(&format!("soft warning: {warning}"));
    }

    output::section("Today");
    output::field("Trades", decision.stats.trade_count);
    let sum = &decision.stats.sum_r;
    let net = if sum.is_sign_negative() && !sum.is_zero() {
        output::negative(format!("{sum}R"))
    } else {
        output::positive(format!("+{sum}R"))
    };
    output::field("Net", net);
    output::field("Streak", format!("{} losses", decision.stats.consecutive_losses));
    if decision.stats.trade_count > 0 {
        output::field(
            "Win rate",
            format!("{:.0}%", decision.stats.win_rate * 100.0),
        );
    }

    output::section("Requirements");
    output::field("Plan (today)", check(decision.requirements.plan_done));
    output::field(
        "Closeout (yesterday)",
        check(decision.requirements.closeout_done),
    );

    if decision.override_until_ms > 0 || decision.override_cooldown_until_ms > 0 {
        output::section("Override");
        if decision.override_active {
            output::field(
                "Active until",
                output::attention(fmt_ms(decision.override_until_ms)),
            );
        }
        output::field("Cooldown until", fmt_ms(decision.override_cooldown_until_ms));
    }

    output::section("Limits");
    output::field("Max trades", limit(decision.limits.max_trades_per_day));
    let loss = decision.limits.max_daily_loss_r;
    output::field(
        "Max loss",
        if loss > rust_decimal::Decimal::ZERO {
            format!("{loss}R")
        } else {
            output::muted("off")
        },
    );
    output::field("Max streak", limit(decision.limits.max_consecutive_losses));
}

fn check(done: bool) -> String {
    if done {
        output::positive("✓ done")
    } else {
        output::attention("✗ missing")
    }
}

fn limit(value: i64) -> String {
    if value > 0 {
        value.to_string()
    } else {
        output::muted("off")
    }
}

/// Format an epoch-ms instant in device-local time.
pub fn fmt_ms(ms: i64) -> String {
    chrono::Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ms.to_string())
}
