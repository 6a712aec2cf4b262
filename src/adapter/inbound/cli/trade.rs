//! Handlers for the `trade` subcommands.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{
    TradeAddArgs, TradeListArgs, TradeRefArgs, TradeTagArgs,
};
use crate::adapter::inbound::cli::{operator::Operator, output, status};
use crate::app::clock::Clock;
use crate::app::entry::{EntryOutcome, TradeDraft};
use crate::domain::rulebreak::RuleBreak;
use crate::domain::trade::{parse_tags, Trade};
use crate::error::Result;
use crate::port::outbound::store::TradeStore;

/// Execute `trade add`. Returns `false` when the gate refused the trade.
pub async fn execute_add(operator: &Operator, args: TradeAddArgs) -> Result<bool> {
    let draft = TradeDraft {
        result_r: args.result,
        risk_r: args.risk,
        session: args.session,
        timeframe: args.timeframe,
        bias: args.bias,
        strategy: args.strategy,
        notes: args.notes,
        tags: args.tags,
    };

    let entry = operator.entry();
    let mut outcome = entry.record(draft.clone(), args.yes).await?;

    if let EntryOutcome::WarningsPending(decision) = &outcome {
        for warning in &decision.soft_warnings {
            output::warning(&format!("soft warning: {warning}"));
        }
        if output::is_json() {
            // Non-interactive: report and refuse without --yes.
            output::json_result(
                "trade_add",
                json!({
                    "recorded": false,
                    "warnings": decision.soft_warnings,
                }),
            );
            return Ok(false);
        }
        let proceed = dialoguer::Confirm::new()
            .with_prompt("Log the trade anyway? (warnings are stamped as rule breaks)")
            .default(false)
            .interact()?;
        if !proceed {
            output::line("Nothing logged.");
            return Ok(true);
        }
        outcome = entry.record(draft, true).await?;
    }

    match outcome {
        EntryOutcome::Recorded { trade, decision } => {
            output::json_result(
                "trade_add",
                json!({ "recorded": true, "trade": trade, "decision": decision }),
            );
            let mut summary = format!("Logged {}R", trade.result_r);
            if let Some(name) = &trade.strategy_name {
                summary.push_str(&format!(" ({name})"));
            }
            output::success(&summary);
            if !trade.rule_breaks.is_empty() {
                output::warning(&format!(
                    "rule breaks stamped: {}",
                    RuleBreak::format_list(&trade.rule_breaks)
                ));
            }
            Ok(true)
        }
        EntryOutcome::Blocked(decision) => {
            output::json_result(
                "trade_add",
                json!({ "recorded": false, "decision": decision }),
            );
            output::error("Gate is locked; trade not logged.");
            for reason in &decision.reasons {
                output::line(&format!("{} {}", output::negative("•"), reason));
            }
            Ok(false)
        }
        EntryOutcome::WarningsPending(_) => Ok(false),
    }
}

/// Table row for `trade list`.
#[derive(Tabled)]
struct TradeRowDisplay {
    #[tabled(rename = "time")]
    time: String,
    #[tabled(rename = "R")]
    result_r: String,
    #[tabled(rename = "session")]
    session: String,
    #[tabled(rename = "strategy")]
    strategy: String,
    #[tabled(rename = "tags")]
    tags: String,
    #[tabled(rename = "rule breaks")]
    rule_breaks: String,
    #[tabled(rename = "id")]
    id: String,
}

impl From<&Trade> for TradeRowDisplay {
    fn from(trade: &Trade) -> Self {
        Self {
            time: status::fmt_ms(trade.created_at_ms),
            result_r: trade.result_r.to_string(),
            session: trade.session.clone(),
            strategy: trade.strategy_name.clone().unwrap_or_default(),
            tags: trade.tags.join(","),
            rule_breaks: RuleBreak::format_list(&trade.rule_breaks),
            id: trade.id.to_string(),
        }
    }
}

/// Execute `trade list`.
pub async fn execute_list(operator: &Operator, args: TradeListArgs) -> Result<()> {
    let trades = match args.day {
        Some(day) => {
            let offset = *operator.clock.now().offset();
            operator.trades.list_window(&day.window(offset)).await?
        }
        None => operator.trades.list_recent(args.limit).await?,
    };

    if output::is_json() {
        output::json_result("trades", serde_json::to_value(&trades)?);
        return Ok(());
    }

    if trades.is_empty() {
        output::line(&output::muted("No trades recorded."));
        return Ok(());
    }

    let rows: Vec<TradeRowDisplay> = trades.iter().map(TradeRowDisplay::from).collect();
    let table = Table::new(rows).with(Style::sharp()).to_string();
    println!("{table}");
    Ok(())
}

/// Execute `trade delete`. Returns `false` when no trade matched.
pub async fn execute_delete(operator: &Operator, args: TradeRefArgs) -> Result<bool> {
    let deleted = operator.trades.delete(&args.id.as_str().into()).await?;
    output::json_result("trade_delete", json!({ "deleted": deleted, "id": args.id }));
    if deleted {
        output::success("Trade deleted");
    } else {
        output::error(&format!("no trade with id {}", args.id));
    }
    Ok(deleted)
}

/// Execute `trade tag`. Returns `false` when no trade matched.
pub async fn execute_tag(operator: &Operator, args: TradeTagArgs) -> Result<bool> {
    let id = args.id.as_str().into();
    let Some(mut trade) = operator.trades.get(&id).await? else {
        output::json_result("trade_tag", json!({ "updated": false, "id": args.id }));
        output::error(&format!("no trade with id {}", args.id));
        return Ok(false);
    };

    if let Some(raw) = &args.tags {
        for tag in parse_tags(raw) {
            if !trade.tags.contains(&tag) {
                trade.tags.push(tag);
            }
        }
    }
    if let Some(raw) = &args.rule_breaks {
        for code in RuleBreak::parse_list(raw) {
            trade.stamp_rule_break(code);
        }
    }
    if let Some(notes) = args.notes {
        trade.notes = notes;
    }

    operator.trades.update_annotations(&trade).await?;
    output::json_result("trade_tag", json!({ "updated": true, "trade": trade }));
    output::success("Trade updated");
    Ok(true)
}
