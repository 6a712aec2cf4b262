//! Handlers for the `settings` subcommands (the admin surface).
//!
//! These write string values into the settings table; the gate re-reads and
//! re-parses them on its next evaluation.

use serde_json::json;

use crate::adapter::inbound::cli::command::{
    SettingsLimitsArgs, SettingsModeArgs, SettingsRequireArgs,
};
use crate::adapter::inbound::cli::{operator::Operator, output};
use crate::domain::settings::{keys, GateSettings};
use crate::error::Result;
use crate::port::outbound::store::SettingStore;

/// Execute `settings show`.
pub async fn execute_show(operator: &Operator) -> Result<()> {
    let raw = operator.settings.all().await?;
    let effective = GateSettings::from_map(&raw);

    if output::is_json() {
        output::json_result(
            "settings",
            json!({ "raw": raw, "effective": effective }),
        );
        return Ok(());
    }

    output::section("Gate settings");
    output::field("Mode", effective.mode.to_string());
    output::field("Max trades", effective.max_trades_per_day);
    output::field("Max loss", format!("{}R", effective.max_daily_loss_r));
    output::field("Max streak", effective.max_consecutive_losses);
    output::field("Require plan", effective.require_daily_plan);
    output::field("Require closeout", effective.require_daily_closeout);
    output::field("Override until", effective.override_until_ms);
    output::field("Cooldown until", effective.override_cooldown_until_ms);
    Ok(())
}

/// Execute `settings mode`.
///
/// Switching modes leaves the override timestamps untouched; they resume
/// applying when real mode returns.
pub async fn execute_mode(operator: &Operator, args: SettingsModeArgs) -> Result<()> {
    operator.settings.set(keys::APP_MODE, &args.mode).await?;
    output::json_result("settings_mode", json!({ "mode": args.mode }));
    if args.mode == "real" {
        output::success("Real mode: the gate is enforced");
    } else {
        output::success("Demo mode: the gate never blocks");
    }
    Ok(())
}

/// Execute `settings limits`.
pub async fn execute_limits(operator: &Operator, args: SettingsLimitsArgs) -> Result<()> {
    if args.max_trades.is_none()
        && args.max_daily_loss.is_none()
        && args.max_consecutive_losses.is_none()
    {
        output::line("Nothing to change; pass at least one limit flag.");
        return Ok(());
    }

    if let Some(value) = args.max_trades {
        operator
            .settings
            .set(keys::MAX_TRADES_PER_DAY, &value.to_string())
            .await?;
        output::success(&format!("Max trades per day: {}", describe(value <= 0, value)));
    }
    if let Some(value) = args.max_daily_loss {
        operator
            .settings
            .set(keys::MAX_DAILY_LOSS_R, &value.to_string())
            .await?;
        output::success(&format!(
            "Max daily loss: {}",
            if value <= rust_decimal::Decimal::ZERO {
                output::muted("off").to_string()
            } else {
                format!("{value}R")
            }
        ));
    }
    if let Some(value) = args.max_consecutive_losses {
        operator
            .settings
            .set(keys::MAX_CONSECUTIVE_LOSSES, &value.to_string())
            .await?;
        output::success(&format!(
            "Max consecutive losses: {}",
            describe(value <= 0, value)
        ));
    }

    output::json_result(
        "settings_limits",
        json!({
            "max_trades": args.max_trades,
            "max_daily_loss": args.max_daily_loss,
            "max_consecutive_losses": args.max_consecutive_losses,
        }),
    );
    Ok(())
}

fn describe(off: bool, value: i64) -> String {
    if off {
        output::muted("off").to_string()
    } else {
        value.to_string()
    }
}

/// Execute `settings require`.
pub async fn execute_require(operator: &Operator, args: SettingsRequireArgs) -> Result<()> {
    if args.plan.is_none() && args.closeout.is_none() {
        output::line("Nothing to change; pass --plan and/or --closeout.");
        return Ok(());
    }

    if let Some(value) = args.plan {
        operator
            .settings
            .set(keys::REQUIRE_DAILY_PLAN, bool_setting(value))
            .await?;
        output::success(&format!("Require daily plan: {value}"));
    }
    if let Some(value) = args.closeout {
        operator
            .settings
            .set(keys::REQUIRE_DAILY_CLOSEOUT, bool_setting(value))
            .await?;
        output::success(&format!("Require daily closeout: {value}"));
    }

    output::json_result(
        "settings_require",
        json!({ "plan": args.plan, "closeout": args.closeout }),
    );
    Ok(())
}

/// Storage form of a boolean setting.
fn bool_setting(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
