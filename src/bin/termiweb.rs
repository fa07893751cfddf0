//! Termi-Web CLI Binary
//!
//! Interactive shell over the persistent virtual filesystem.

use anyhow::Context;
use clap::Parser;
use std::process;
use termiweb::logging::init_logging;
use termiweb::tooling::cli::{exit_code, Cli, CliContext};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = cli.load_config().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let context = CliContext::new(&config, cli.ephemeral)
        .await
        .context("Error initializing filesystem")?;

    if let Some(line) = &cli.command {
        return Ok(exit_code(context.run_line(line).await));
    }
    context.run_stdin().await?;
    Ok(0)
}
