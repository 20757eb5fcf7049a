use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use pricing_core::{InputField, PricingSession};
use tracing::{debug, info};

use crate::cli::{Cli, Command, OutputFormat};
use crate::config::Config;
use crate::utils::parse_decimal_or_zero;
use crate::{interactive, render, scenario_loader};

/// Loads the config file named on the command line, or an empty config.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn flag_values(cli: &Cli) -> [(InputField, Option<&str>); 4] {
    [
        (InputField::DealerCost, cli.dealer_cost.as_deref()),
        (InputField::BuyerPercentage, cli.buyer_percent.as_deref()),
        (InputField::TransactionFeePercent, cli.fee.as_deref()),
        (InputField::FreightPerThousand, cli.freight.as_deref()),
    ]
}

/// Builds the starting session: defaults, then the config file, then the
/// scenario CSV, then command-line values (which win over the config).
pub fn build_session(
    cli: &Cli,
    config: &Config,
) -> Result<PricingSession> {
    let mut session = PricingSession::new();
    config.apply(&mut session);

    if let Some(path) = &cli.scenarios {
        let scenarios = scenario_loader::load_from_file(path)
            .with_context(|| format!("Failed to load scenarios from: {}", path.display()))?;
        for scenario in scenarios {
            session.push_scenario(scenario);
        }
    }

    for (field, raw) in flag_values(cli) {
        if let Some(raw) = raw {
            session.set_field(field, parse_decimal_or_zero(raw));
        }
    }

    debug!(inputs = ?session.inputs(), "session ready");
    Ok(session)
}

/// Runs the selected command against `session`, writing to `out`.
pub fn run<R: BufRead, W: Write>(
    cli: &Cli,
    mut session: PricingSession,
    input: R,
    out: &mut W,
) -> Result<()> {
    let command = cli
        .command
        .clone()
        .unwrap_or(Command::Show { formulas: false });

    match (command, cli.format) {
        (Command::Show { formulas }, format) => {
            if formulas {
                session.show_all_formulas();
            }
            match format {
                OutputFormat::Text => writeln!(out, "{}", render::result_text(&session))?,
                OutputFormat::Json => writeln!(out, "{}", render::result_json(&session)?)?,
            }
        }
        (Command::Compare, OutputFormat::Text) => writeln!(
            out,
            "{}",
            render::comparison_text(
                session.inputs(),
                &session.result(),
                &session.scenario_rows()
            )
        )?,
        (Command::Compare, OutputFormat::Json) => writeln!(
            out,
            "{}",
            render::comparison_json(&session.result(), &session.scenario_rows())?
        )?,
        (Command::WhatIf, OutputFormat::Text) => writeln!(
            out,
            "{}",
            render::what_if_text(&session.result(), &session.what_if())
        )?,
        (Command::WhatIf, OutputFormat::Json) => {
            writeln!(out, "{}", render::what_if_json(&session.what_if())?)?
        }
        (Command::Export, _) => writeln!(out, "{}", session.export_text())?,
        (Command::Session, _) => {
            interactive::run(&mut session, input, out).context("interactive session failed")?
        }
    }

    Ok(())
}
