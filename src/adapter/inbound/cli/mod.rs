//! CLI module graph and command dispatch.

pub mod admin;
pub mod command;
pub mod gate;
pub mod init;
pub mod operator;
pub mod output;
pub mod paths;
pub mod plan;
pub mod status;
pub mod strategy;
pub mod trade;

use std::path::PathBuf;
use std::process::ExitCode;

use command::{
    Cli, CloseoutCommand, Commands, GateCommand, PlanCommand, SettingsCommand, StrategyCommand,
    TradeCommand,
};
use operator::Operator;
use output::OutputConfig;

use crate::config::Config;
use crate::error::Result;

/// Run a parsed CLI invocation to completion.
pub async fn run(cli: Cli) -> ExitCode {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("failed to load config: {e}"));
            return ExitCode::FAILURE;
        }
    };
    config.init_logging();

    let db_path = cli.db.clone().unwrap_or(config.database.path.clone());

    match dispatch(cli, db_path).await {
        Ok(code) => code,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli, db_path: PathBuf) -> Result<ExitCode> {
    if let Commands::Init(args) = &cli.command {
        init::execute(&cli.config, &db_path, args.force).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let operator = Operator::open(&db_path)?;

    let ok = match cli.command {
        Commands::Init(_) => unreachable!("handled above"),
        Commands::Status => {
            status::execute(&operator).await?;
            true
        }
        Commands::Trade(command) => match command {
            TradeCommand::Add(args) => trade::execute_add(&operator, args).await?,
            TradeCommand::List(args) => {
                trade::execute_list(&operator, args).await?;
                true
            }
            TradeCommand::Delete(args) => trade::execute_delete(&operator, args).await?,
            TradeCommand::Tag(args) => trade::execute_tag(&operator, args).await?,
        },
        Commands::Plan(command) => match command {
            PlanCommand::Set(args) => {
                plan::execute_plan_set(&operator, args).await?;
                true
            }
            PlanCommand::Show(args) => {
                plan::execute_plan_show(&operator, args).await?;
                true
            }
        },
        Commands::Closeout(command) => match command {
            CloseoutCommand::Set(args) => {
                plan::execute_closeout_set(&operator, args).await?;
                true
            }
            CloseoutCommand::Show(args) => {
                plan::execute_closeout_show(&operator, args).await?;
                true
            }
        },
        Commands::Strategy(command) => match command {
            StrategyCommand::Add(args) => {
                strategy::execute_add(&operator, args).await?;
                true
            }
            StrategyCommand::List => {
                strategy::execute_list(&operator).await?;
                true
            }
            StrategyCommand::Show(args) => strategy::execute_show(&operator, args).await?,
            StrategyCommand::Delete(args) => strategy::execute_delete(&operator, args).await?,
        },
        Commands::Gate(command) => match command {
            GateCommand::Status => {
                gate::execute_status(&operator).await?;
                true
            }
            GateCommand::Override(args) => {
                gate::execute_override(&operator, args.yes).await?;
                true
            }
            GateCommand::ClearOverride => {
                gate::execute_clear_override(&operator).await?;
                true
            }
        },
        Commands::Settings(command) => match command {
            SettingsCommand::Show => {
                admin::execute_show(&operator).await?;
                true
            }
            SettingsCommand::Mode(args) => {
                admin::execute_mode(&operator, args).await?;
                true
            }
            SettingsCommand::Limits(args) => {
                admin::execute_limits(&operator, args).await?;
                true
            }
            SettingsCommand::Require(args) => {
                admin::execute_require(&operator, args).await?;
                true
            }
        },
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
