//! Handlers for the `gate` subcommands.

use serde_json::json;

use crate::adapter::inbound::cli::{operator::Operator, output, status};
use crate::app::gate::OverrideOutcome;
use crate::error::Result;

/// Execute `gate status`.
pub async fn execute_status(operator: &Operator) -> Result<()> {
    status::execute(operator).await
}

/// Execute `gate override`.
///
/// The override bypasses every hard limit for one hour and locks
/// re-activation for 24 hours from this moment, so it confirms first.
pub async fn execute_override(operator: &Operator, yes: bool) -> Result<()> {
    if !yes && !output::is_json() {
        output::warning("The override bypasses all hard limits for 1 hour.");
        output::warning("Activating locks the override away for the next 24 hours.");
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Activate the emergency override?")
            .default(false)
            .interact()?;
        if !confirmed {
            output::line("Nothing changed.");
            return Ok(());
        }
    }

    let outcome = operator.gate().activate_override().await?;
    match outcome {
        OverrideOutcome::Activated {
            until_ms,
            cooldown_until_ms,
        } => {
            output::json_result(
                "override",
                json!({
                    "activated": true,
                    "until_ms": until_ms,
                    "cooldown_until_ms": cooldown_until_ms,
                }),
            );
            output::success(&format!(
                "Override active until {}",
                status::fmt_ms(until_ms)
            ));
            output::line(&format!(
                "Next activation possible {}",
                status::fmt_ms(cooldown_until_ms)
            ));
        }
        OverrideOutcome::CooldownActive { until_ms } => {
            // An anticipated no-op, not an error.
            output::json_result(
                "override",
                json!({ "activated": false, "cooldown_until_ms": until_ms }),
            );
            output::warning(&format!(
                "Override unavailable until {}",
                status::fmt_ms(until_ms)
            ));
        }
        OverrideOutcome::DemoMode => {
            output::json_result("override", json!({ "activated": false, "demo": true }));
            output::line("Demo mode never blocks; there is nothing to override.");
        }
    }
    Ok(())
}

/// Execute `gate clear-override`.
pub async fn execute_clear_override(operator: &Operator) -> Result<()> {
    operator.gate().clear_override().await?;
    output::json_result("override", json!({ "cleared": true }));
    output::success("Override window cleared (cooldown unchanged)");
    Ok(())
}
