use std::process::ExitCode;

use clap::Parser;

use tiltguard::adapter::inbound::cli::{self, command::Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::run(cli).await
}
