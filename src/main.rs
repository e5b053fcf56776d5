mod app;
mod cli;
mod config;
mod constants;
mod contact;
mod domain;
mod effects;
mod error;
mod filter;
mod logging;
mod navigation;
mod storage;
mod timing;
mod visitor;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{cli::Cli, config::Config};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    let logs_dir = storage::get_logs_dir();
    let log_file = logging::init_file_logging(&logs_dir)?;
    if let Ok(count) = logging::cleanup_old_logs(&logs_dir)
        && count > 0
    {
        tracing::info!("Cleaned up {} old log files", count);
    }
    tracing::info!("Logging to: {}", log_file.path.display());

    let catalog = cli::load_catalog(cli.catalog.as_ref(), &config)?;

    match cli.command {
        Some(command) => cli::run_cli(command, &config, &catalog),
        None => {
            let start_section = cli.view.and_then(|view| view.section());
            app::run_ui(catalog, config, start_section).context("Terminal UI failed")
        }
    }
}
