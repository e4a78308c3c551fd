// ABOUTME: Entry point for the swatch command line tool
// ABOUTME: Sets up logging from the verbosity flag and dispatches the chosen subcommand

mod cli;
mod commands;
mod table;

use anyhow::{Context, Result};
use clap::Parser;
use swatchbook_logging::LoggingConfig;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_verbosity(cli.verbose);
    logging
        .apply_env_overrides()
        .context("invalid logging environment")?;
    swatchbook_logging::init_logging_with_config(logging).context("failed to initialize logging")?;

    let mut stdout = std::io::stdout();
    commands::run(cli, &mut stdout).await
}
