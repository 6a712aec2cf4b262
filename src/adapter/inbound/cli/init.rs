//! Handler for the `init` command.
//!
//! Creates `~/.tiltguard/`, writes the default config file, and creates the
//! database (running migrations) so every other command starts from a
//! working setup.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{operator::Operator, output, paths};
use crate::config::Config;
use crate::error::Result;

/// Execute the init command.
pub async fn execute(config_path: &Path, db_path: &Path, force: bool) -> Result<()> {
    paths::ensure_home_dir()?;

    if config_path.exists() && !force {
        output::line(&format!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        ));
    } else {
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(config_path, Config::template())?;
        output::success(&format!("Wrote {}", config_path.display()));
    }

    // Opening runs the migrations.
    Operator::open(db_path)?;
    output::success(&format!("Database ready at {}", db_path.display()));

    output::json_result(
        "init",
        json!({
            "config": config_path.display().to_string(),
            "database": db_path.display().to_string(),
        }),
    );

    output::line("Next steps:");
    output::line("  tiltguard settings mode real   # enforce the gate");
    output::line("  tiltguard plan set --bias ...  # write today's plan");
    output::line("  tiltguard trade add -r -0.5    # log a trade");
    Ok(())
}
