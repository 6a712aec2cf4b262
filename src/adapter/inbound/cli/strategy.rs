//! Handlers for the `strategy` subcommands.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{StrategyAddArgs, StrategyRefArgs};
use crate::adapter::inbound::cli::{operator::Operator, output};
use crate::app::clock::Clock;
use crate::domain::strategy::Strategy;
use crate::error::Result;
use crate::port::outbound::store::StrategyStore;

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Execute `strategy add`.
pub async fn execute_add(operator: &Operator, args: StrategyAddArgs) -> Result<()> {
    let mut strategy = Strategy::try_new(args.name, args.market, operator.clock.now_ms())?;
    strategy.styles = split_csv(&args.styles);
    strategy.timeframes = split_csv(&args.timeframes);
    strategy.description = args.description;
    strategy.checklist = args.checklist;
    strategy.image_ref = args.image;

    operator.strategies.upsert(&strategy).await?;
    output::json_result("strategy_add", json!({ "strategy": strategy }));
    output::success(&format!("Strategy \"{}\" saved", strategy.name));
    output::field("Id", &strategy.id);
    Ok(())
}

/// Table row for `strategy list`.
#[derive(Tabled)]
struct StrategyRowDisplay {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "market")]
    market: String,
    #[tabled(rename = "styles")]
    styles: String,
    #[tabled(rename = "timeframes")]
    timeframes: String,
    #[tabled(rename = "id")]
    id: String,
}

impl From<&Strategy> for StrategyRowDisplay {
    fn from(strategy: &Strategy) -> Self {
        Self {
            name: strategy.name.clone(),
            market: strategy.market.to_string(),
            styles: strategy.styles.join(","),
            timeframes: strategy.timeframes.join(","),
            id: strategy.id.to_string(),
        }
    }
}

/// Execute `strategy list`.
pub async fn execute_list(operator: &Operator) -> Result<()> {
    let strategies = operator.strategies.list().await?;

    if output::is_json() {
        output::json_result("strategies", serde_json::to_value(&strategies)?);
        return Ok(());
    }

    if strategies.is_empty() {
        output::line(&output::muted("No strategies defined."));
        return Ok(());
    }

    let rows: Vec<StrategyRowDisplay> = strategies.iter().map(StrategyRowDisplay::from).collect();
    let table = Table::new(rows).with(Style::sharp()).to_string();
    println!("{table}");
    Ok(())
}

/// Resolve a strategy by id first, then by exact name.
async fn resolve(operator: &Operator, reference: &str) -> Result<Option<Strategy>> {
    if let Some(strategy) = operator.strategies.get(&reference.into()).await? {
        return Ok(Some(strategy));
    }
    operator.strategies.find_by_name(reference).await
}

/// Execute `strategy show`. Returns `false` when nothing matched.
pub async fn execute_show(operator: &Operator, args: StrategyRefArgs) -> Result<bool> {
    let Some(strategy) = resolve(operator, &args.reference).await? else {
        output::json_result("strategy", serde_json::Value::Null);
        output::error(&format!("no strategy matches {:?}", args.reference));
        return Ok(false);
    };

    if output::is_json() {
        output::json_result("strategy", serde_json::to_value(&strategy)?);
        return Ok(true);
    }

    output::section(&strategy.name);
    output::field("Market", strategy.market.to_string());
    output::field("Styles", strategy.styles.join(","));
    output::field("Timeframes", strategy.timeframes.join(","));
    output::field("Description", &strategy.description);
    output::field("Checklist", &strategy.checklist);
    if let Some(image) = &strategy.image_ref {
        output::field("Image", image);
    }
    output::field("Id", &strategy.id);
    Ok(true)
}

/// Execute `strategy delete`. Returns `false` when nothing matched.
pub async fn execute_delete(operator: &Operator, args: StrategyRefArgs) -> Result<bool> {
    let Some(strategy) = resolve(operator, &args.reference).await? else {
        output::json_result("strategy_delete", json!({ "deleted": false }));
        output::error(&format!("no strategy matches {:?}", args.reference));
        return Ok(false);
    };

    operator.strategies.delete(&strategy.id).await?;
    output::json_result(
        "strategy_delete",
        json!({ "deleted": true, "id": strategy.id }),
    );
    output::success(&format!(
        "Strategy \"{}\" deleted (logged trades keep its name)",
        strategy.name
    ));
    Ok(true)
}
