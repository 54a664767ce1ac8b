use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod context;
mod output;

const LOG_ENV: &str = "CAMPUS_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("campus error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> anyhow::Result<()> {
    let flags = cli.global_flags();
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(flags.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("cannot install log subscriber: {error}"))?;

    let config = campus_config::CampusConfig::load_with_dotenv().context("loading configuration")?;
    let ctx = context::AppContext::init(config, &flags).await?;
    tracing::debug!(command = ?cli.command, "dispatching");

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}
