//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tiltguard application using `clap`.
//! The CLI supports subcommands for logging trades behind the discipline
//! gate, writing daily plans and closeouts, managing strategies, inspecting
//! the gate, and editing the gate's settings.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::day::DayKey;
use crate::domain::strategy::MarketTag;

use super::paths;

/// Trading-discipline journal and rule-enforcement CLI
#[derive(Parser, Debug)]
#[command(name = "tiltguard")]
#[command(version)]
pub struct Cli {
    /// Path to the SQLite database file (defaults to the configured path).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the tiltguard CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the home directory, config file, and database
    Init(InitArgs),

    /// Show the gate decision and today's discipline dashboard
    Status,

    /// Log and manage trades
    #[command(subcommand)]
    Trade(TradeCommand),

    /// Write or view the daily plan
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Write or view the daily closeout
    #[command(subcommand)]
    Closeout(CloseoutCommand),

    /// Manage reusable strategies
    #[command(subcommand)]
    Strategy(StrategyCommand),

    /// Inspect the gate and manage the emergency override
    #[command(subcommand)]
    Gate(GateCommand),

    /// View and edit discipline-gate settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite the config file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Subcommands for `tiltguard trade`.
#[derive(Subcommand, Debug)]
pub enum TradeCommand {
    /// Log a trade (evaluated against the gate at submission).
    Add(TradeAddArgs),
    /// List trades for a day or the most recent ones.
    List(TradeListArgs),
    /// Delete a trade permanently.
    Delete(TradeRefArgs),
    /// Update a trade's tags, rule breaks, or notes.
    Tag(TradeTagArgs),
}

/// Arguments for `trade add`.
#[derive(Parser, Debug)]
pub struct TradeAddArgs {
    /// Result as a signed R-multiple (e.g. -0.5, 2).
    #[arg(short, long, allow_hyphen_values = true)]
    pub result: Decimal,

    /// Risk taken on the entry, in R.
    #[arg(long, allow_hyphen_values = true)]
    pub risk: Option<Decimal>,

    /// Session label (e.g. "london", "ny").
    #[arg(long, default_value = "")]
    pub session: String,

    /// Timeframe label (e.g. "m5").
    #[arg(long, default_value = "")]
    pub timeframe: String,

    /// Directional bias (e.g. "long").
    #[arg(long, default_value = "")]
    pub bias: String,

    /// Strategy reference by id or exact name.
    #[arg(long)]
    pub strategy: Option<String>,

    /// Free-text notes.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Comma-separated tags (normalized to UPPER_SNAKE codes).
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Proceed without confirming soft warnings.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `trade list`.
#[derive(Parser, Debug)]
pub struct TradeListArgs {
    /// Day to list (YYYY-MM-DD); defaults to the most recent trades.
    #[arg(long)]
    pub day: Option<DayKey>,

    /// Maximum number of trades without --day.
    #[arg(long, default_value = "20")]
    pub limit: i64,
}

/// Arguments for commands addressing one trade.
#[derive(Parser, Debug)]
pub struct TradeRefArgs {
    /// Trade id.
    pub id: String,
}

/// Arguments for `trade tag`.
#[derive(Parser, Debug)]
pub struct TradeTagArgs {
    /// Trade id.
    pub id: String,

    /// Comma-separated tags to add.
    #[arg(long)]
    pub tags: Option<String>,

    /// Comma-separated rule-break codes to add (legacy spellings accepted).
    #[arg(long)]
    pub rule_breaks: Option<String>,

    /// Replace the trade's notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Subcommands for `tiltguard plan`.
#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// Write (or overwrite) the plan for a day.
    Set(PlanSetArgs),
    /// Show the plan for a day.
    Show(DayArg),
}

/// Arguments for `plan set`.
#[derive(Parser, Debug)]
pub struct PlanSetArgs {
    /// Directional bias for the session.
    #[arg(long, default_value = "")]
    pub bias: String,

    /// High-impact news expected today.
    #[arg(long)]
    pub news_caution: bool,

    /// Key levels to watch.
    #[arg(long, default_value = "")]
    pub key_levels: String,

    /// Scenarios / if-then playbook.
    #[arg(long, default_value = "")]
    pub scenarios: String,

    /// Day to plan (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub day: Option<DayKey>,
}

/// Subcommands for `tiltguard closeout`.
#[derive(Subcommand, Debug)]
pub enum CloseoutCommand {
    /// Write (or overwrite) the closeout for a day.
    Set(CloseoutSetArgs),
    /// Show the closeout for a day.
    Show(DayArg),
}

/// Arguments for `closeout set`.
#[derive(Parser, Debug)]
pub struct CloseoutSetArgs {
    /// Mood after the session, 1-5.
    #[arg(long)]
    pub mood: i64,

    /// Execution grade (e.g. "B+").
    #[arg(long, default_value = "")]
    pub grade: String,

    /// Free-text review of the session.
    #[arg(long, default_value = "")]
    pub review: String,

    /// Day to close out (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub day: Option<DayKey>,
}

/// Shared day argument for show commands.
#[derive(Parser, Debug)]
pub struct DayArg {
    /// Day (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub day: Option<DayKey>,
}

/// Subcommands for `tiltguard strategy`.
#[derive(Subcommand, Debug)]
pub enum StrategyCommand {
    /// Create a strategy.
    Add(StrategyAddArgs),
    /// List all strategies.
    List,
    /// Show one strategy by id or name.
    Show(StrategyRefArgs),
    /// Delete a strategy (trades keep its name).
    Delete(StrategyRefArgs),
}

/// Arguments for `strategy add`.
#[derive(Parser, Debug)]
pub struct StrategyAddArgs {
    /// Strategy name.
    pub name: String,

    /// Instrument grouping.
    #[arg(long, value_enum, default_value_t = MarketTag::Both)]
    pub market: MarketTag,

    /// Comma-separated style tags (e.g. "breakout,reversal").
    #[arg(long, default_value = "")]
    pub styles: String,

    /// Comma-separated timeframes (e.g. "m5,m15").
    #[arg(long, default_value = "")]
    pub timeframes: String,

    /// Free-text description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Entry checklist.
    #[arg(long, default_value = "")]
    pub checklist: String,

    /// Reference to a chart image.
    #[arg(long)]
    pub image: Option<String>,
}

/// Arguments for commands addressing one strategy.
#[derive(Parser, Debug)]
pub struct StrategyRefArgs {
    /// Strategy id or exact name.
    pub reference: String,
}

/// Subcommands for `tiltguard gate`.
#[derive(Subcommand, Debug)]
pub enum GateCommand {
    /// Show the current gate decision.
    Status,
    /// Activate the emergency override (1 hour, 24 hour cooldown).
    Override(GateOverrideArgs),
    /// End the active override window early (cooldown is untouched).
    ClearOverride,
}

/// Arguments for `gate override`.
#[derive(Parser, Debug)]
pub struct GateOverrideArgs {
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Subcommands for `tiltguard settings`.
#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show raw and effective gate settings.
    Show,
    /// Switch the application mode.
    Mode(SettingsModeArgs),
    /// Edit the hard limits.
    Limits(SettingsLimitsArgs),
    /// Toggle the plan/closeout requirements.
    Require(SettingsRequireArgs),
}

/// Arguments for `settings mode`.
#[derive(Parser, Debug)]
pub struct SettingsModeArgs {
    /// Target mode: "real" enforces the gate, "demo" bypasses it.
    #[arg(value_parser = ["demo", "real"])]
    pub mode: String,
}

/// Arguments for `settings limits`.
#[derive(Parser, Debug)]
pub struct SettingsLimitsArgs {
    /// Max trades per day (<= 0 disables the rule).
    #[arg(long, allow_hyphen_values = true)]
    pub max_trades: Option<i64>,

    /// Max daily loss in R (<= 0 disables the rule).
    #[arg(long, allow_hyphen_values = true)]
    pub max_daily_loss: Option<Decimal>,

    /// Max consecutive losses (<= 0 disables the rule).
    #[arg(long, allow_hyphen_values = true)]
    pub max_consecutive_losses: Option<i64>,
}

/// Arguments for `settings require`.
#[derive(Parser, Debug)]
pub struct SettingsRequireArgs {
    /// Surface a warning when today's plan is missing.
    #[arg(long)]
    pub plan: Option<bool>,

    /// Surface a warning when yesterday's closeout is missing.
    #[arg(long)]
    pub closeout: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    // Tests for CLI structure validation

    #[test]
    fn cli_command_factory_builds() {
        // Verifies that the CLI definition is valid
        let _ = Cli::command();
    }

    #[test]
    fn cli_has_version_and_name() {
        let cmd = Cli::command();
        assert!(cmd.get_version().is_some());
        assert_eq!(cmd.get_name(), "tiltguard");
    }

    // Tests for parsing basic CLI options

    #[test]
    fn parse_status_command() {
        let cli = Cli::try_parse_from(["tiltguard", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status));
        assert!(!cli.json);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tiltguard", "status", "--json", "-q", "-vv"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_db_override() {
        let cli = Cli::try_parse_from(["tiltguard", "--db", "/tmp/t.db", "status"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/t.db")));

        let cli = Cli::try_parse_from(["tiltguard", "status"]).unwrap();
        assert_eq!(cli.db, None);
    }

    // Tests for trade add parsing

    #[test]
    fn trade_add_parses_negative_r() {
        let cli = Cli::try_parse_from(["tiltguard", "trade", "add", "-r", "-0.5"]).unwrap();
        let Commands::Trade(TradeCommand::Add(args)) = cli.command else {
            panic!("Expected trade add");
        };
        assert_eq!(args.result, dec!(-0.5));
        assert!(!args.yes);
    }

    #[test]
    fn trade_add_requires_result() {
        let result = Cli::try_parse_from(["tiltguard", "trade", "add"]);
        assert!(result.is_err());
    }

    #[test]
    fn trade_add_rejects_unparseable_r() {
        let result = Cli::try_parse_from(["tiltguard", "trade", "add", "-r", "half"]);
        assert!(result.is_err());
    }

    #[test]
    fn trade_add_full_flags() {
        let cli = Cli::try_parse_from([
            "tiltguard", "trade", "add", "-r", "2", "--risk", "1", "--session", "ny",
            "--timeframe", "m5", "--bias", "long", "--strategy", "London sweep", "--tags",
            "fomo,late", "--notes", "chased it", "--yes",
        ])
        .unwrap();
        let Commands::Trade(TradeCommand::Add(args)) = cli.command else {
            panic!("Expected trade add");
        };
        assert_eq!(args.risk, Some(dec!(1)));
        assert_eq!(args.session, "ny");
        assert_eq!(args.strategy.as_deref(), Some("London sweep"));
        assert!(args.yes);
    }

    #[test]
    fn trade_list_parses_day() {
        let cli =
            Cli::try_parse_from(["tiltguard", "trade", "list", "--day", "2026-08-07"]).unwrap();
        let Commands::Trade(TradeCommand::List(args)) = cli.command else {
            panic!("Expected trade list");
        };
        assert_eq!(args.day.unwrap().to_string(), "2026-08-07");
    }

    #[test]
    fn trade_list_rejects_malformed_day() {
        let result = Cli::try_parse_from(["tiltguard", "trade", "list", "--day", "08/07/2026"]);
        assert!(result.is_err());
    }

    // Tests for plan/closeout parsing

    #[test]
    fn plan_set_defaults() {
        let cli = Cli::try_parse_from(["tiltguard", "plan", "set", "--bias", "long"]).unwrap();
        let Commands::Plan(PlanCommand::Set(args)) = cli.command else {
            panic!("Expected plan set");
        };
        assert_eq!(args.bias, "long");
        assert!(!args.news_caution);
        assert!(args.day.is_none());
    }

    #[test]
    fn closeout_set_requires_mood() {
        let result = Cli::try_parse_from(["tiltguard", "closeout", "set"]);
        assert!(result.is_err());

        let cli =
            Cli::try_parse_from(["tiltguard", "closeout", "set", "--mood", "4"]).unwrap();
        let Commands::Closeout(CloseoutCommand::Set(args)) = cli.command else {
            panic!("Expected closeout set");
        };
        assert_eq!(args.mood, 4);
    }

    // Tests for strategy parsing

    #[test]
    fn strategy_add_parses_market_enum() {
        let cli = Cli::try_parse_from([
            "tiltguard", "strategy", "add", "London sweep", "--market", "gold",
        ])
        .unwrap();
        let Commands::Strategy(StrategyCommand::Add(args)) = cli.command else {
            panic!("Expected strategy add");
        };
        assert_eq!(args.name, "London sweep");
        assert_eq!(args.market, MarketTag::Gold);
    }

    #[test]
    fn strategy_add_rejects_unknown_market() {
        let result = Cli::try_parse_from([
            "tiltguard", "strategy", "add", "x", "--market", "es",
        ]);
        assert!(result.is_err());
    }

    // Tests for gate and settings parsing

    #[test]
    fn gate_subcommands_parse() {
        assert!(matches!(
            Cli::try_parse_from(["tiltguard", "gate", "status"]).unwrap().command,
            Commands::Gate(GateCommand::Status)
        ));
        assert!(matches!(
            Cli::try_parse_from(["tiltguard", "gate", "override", "--yes"])
                .unwrap()
                .command,
            Commands::Gate(GateCommand::Override(GateOverrideArgs { yes: true }))
        ));
        assert!(matches!(
            Cli::try_parse_from(["tiltguard", "gate", "clear-override"])
                .unwrap()
                .command,
            Commands::Gate(GateCommand::ClearOverride)
        ));
    }

    #[test]
    fn settings_mode_accepts_only_known_modes() {
        let cli = Cli::try_parse_from(["tiltguard", "settings", "mode", "real"]).unwrap();
        let Commands::Settings(SettingsCommand::Mode(args)) = cli.command else {
            panic!("Expected settings mode");
        };
        assert_eq!(args.mode, "real");

        let result = Cli::try_parse_from(["tiltguard", "settings", "mode", "live"]);
        assert!(result.is_err());
    }

    #[test]
    fn settings_limits_accepts_negative_disable_values() {
        let cli = Cli::try_parse_from([
            "tiltguard", "settings", "limits", "--max-trades", "-1", "--max-daily-loss", "0",
        ])
        .unwrap();
        let Commands::Settings(SettingsCommand::Limits(args)) = cli.command else {
            panic!("Expected settings limits");
        };
        assert_eq!(args.max_trades, Some(-1));
        assert_eq!(args.max_daily_loss, Some(dec!(0)));
        assert_eq!(args.max_consecutive_losses, None);
    }

    #[test]
    fn settings_require_parses_bools() {
        let cli = Cli::try_parse_from([
            "tiltguard", "settings", "require", "--plan", "false", "--closeout", "true",
        ])
        .unwrap();
        let Commands::Settings(SettingsCommand::Require(args)) = cli.command else {
            panic!("Expected settings require");
        };
        assert_eq!(args.plan, Some(false));
        assert_eq!(args.closeout, Some(true));
    }

    // Error cases

    #[test]
    fn unknown_command_fails() {
        assert!(Cli::try_parse_from(["tiltguard", "unknown"]).is_err());
    }

    #[test]
    fn missing_subcommand_fails() {
        assert!(Cli::try_parse_from(["tiltguard"]).is_err());
    }
}
