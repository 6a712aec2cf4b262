//! Handlers for the `plan` and `closeout` subcommands.

use serde_json::json;

use crate::adapter::inbound::cli::command::{CloseoutSetArgs, DayArg, PlanSetArgs};
use crate::adapter::inbound::cli::{operator::Operator, output, status};
use crate::app::clock::Clock;
use crate::domain::plan::{DailyCloseout, DailyPlan, Mood};
use crate::error::Result;
use crate::port::outbound::store::JournalStore;

/// Execute `plan set`.
pub async fn execute_plan_set(operator: &Operator, args: PlanSetArgs) -> Result<()> {
    let day = args.day.unwrap_or_else(|| operator.today());
    let plan = DailyPlan {
        day,
        bias: args.bias,
        news_caution: args.news_caution,
        key_levels: args.key_levels,
        scenarios: args.scenarios,
        created_at_ms: operator.clock.now_ms(),
    };

    operator.journal.upsert_plan(&plan).await?;
    output::json_result("plan_set", json!({ "plan": plan }));
    output::success(&format!("Plan saved for {day}"));
    Ok(())
}

/// Execute `plan show`.
pub async fn execute_plan_show(operator: &Operator, args: DayArg) -> Result<()> {
    let day = args.day.unwrap_or_else(|| operator.today());

    match operator.journal.plan(&day).await? {
        Some(plan) => {
            if output::is_json() {
                output::json_result("plan", serde_json::to_value(&plan)?);
                return Ok(());
            }
            output::section(&format!("Plan {day}"));
            output::field("Bias", &plan.bias);
            output::field(
                "News",
                if plan.news_caution {
                    output::attention("caution")
                } else {
                    output::muted("clear")
                },
            );
            output::field("Key levels", &plan.key_levels);
            output::field("Scenarios", &plan.scenarios);
            output::field("Written", status::fmt_ms(plan.created_at_ms));
        }
        None => {
            output::json_result("plan", serde_json::Value::Null);
            output::line(&output::muted(format!("No plan recorded for {day}.")));
        }
    }
    Ok(())
}

/// Execute `closeout set`.
pub async fn execute_closeout_set(operator: &Operator, args: CloseoutSetArgs) -> Result<()> {
    let day = args.day.unwrap_or_else(|| operator.today());
    let closeout = DailyCloseout {
        day,
        mood: Mood::try_new(args.mood)?,
        grade: args.grade,
        review: args.review,
        created_at_ms: operator.clock.now_ms(),
    };

    operator.journal.upsert_closeout(&closeout).await?;
    output::json_result("closeout_set", json!({ "closeout": closeout }));
    output::success(&format!("Closeout saved for {day}"));
    Ok(())
}

/// Execute `closeout show`.
pub async fn execute_closeout_show(operator: &Operator, args: DayArg) -> Result<()> {
    let day = args.day.unwrap_or_else(|| operator.today());

    match operator.journal.closeout(&day).await? {
        Some(closeout) => {
            if output::is_json() {
                output::json_result("closeout", serde_json::to_value(&closeout)?);
                return Ok(());
            }
            output::section(&format!("Closeout {day}"));
            output::field("Mood", format!("{}/5", closeout.mood.value()));
            output::field("Grade", &closeout.grade);
            output::field("Review", &closeout.review);
            output::field("Written", status::fmt_ms(closeout.created_at_ms));
        }
        None => {
            output::json_result("closeout", serde_json::Value::Null);
            output::line(&output::muted(format!("No closeout recorded for {day}.")));
        }
    }
    Ok(())
}
