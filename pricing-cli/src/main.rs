use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use pricing_cli::{app, cli::Cli, logging};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logs = logging::init_logging()?;
    if let Some(path) = &cli.log_file {
        logs.log_to_file(path)?;
    }

    let config = app::load_config(&cli)?;
    logs.apply_level(cli.log_level.as_deref(), config.log_level.as_deref())?;

    let session = app::build_session(&cli, &config)?;
    debug!(command = ?cli.command, "running");

    let stdin = io::stdin();
    let stdout = io::stdout();
    app::run(&cli, session, stdin.lock(), &mut stdout.lock()).context("command failed")?;

    Ok(())
}
