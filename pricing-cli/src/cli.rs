use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Buyer purchase price calculator.
///
/// Computes the buyer price from dealer cost, the buyer-pays percentage, the
/// transaction fee and the freight contribution per $1,000, and compares it
/// against preset and custom scenarios.
///
/// Numeric values accept `$`, `%` and thousands separators. Anything that is
/// not a number is treated as 0; out-of-range values are clamped.
#[derive(Debug, Parser)]
#[command(name = "buyer-price", version, about)]
pub struct Cli {
    /// Total dealer cost in dollars.
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub dealer_cost: Option<String>,

    /// Percentage of dealer cost the buyer pays (0-100).
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub buyer_percent: Option<String>,

    /// Transaction fee percentage applied to the buyer base (0-100).
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub fee: Option<String>,

    /// Freight contribution in dollars per $1,000 of dealer cost.
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub freight: Option<String>,

    /// TOML config file with starting inputs and custom scenarios.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV file of custom scenarios (name,transaction_fee_percent,freight_per_thousand).
    #[arg(long, global = true)]
    pub scenarios: Option<PathBuf>,

    /// Output format for show, compare and what-if.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log filter (e.g. `debug`). Overrides RUST_LOG and the config file.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the calculated result (default).
    Show {
        /// Include the worked formula under each line.
        #[arg(long)]
        formulas: bool,
    },
    /// Compare the current configuration against every scenario.
    Compare,
    /// Show the effect of changing the transaction fee by -2..+2 points.
    WhatIf,
    /// Print the copy/export text.
    Export,
    /// Read commands from stdin and keep a session open.
    Session,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_values_are_accepted() {
        let cli = Cli::parse_from(["buyer-price", "--fee", "-5", "compare"]);

        assert_eq!(cli.fee.as_deref(), Some("-5"));
        assert_eq!(cli.command, Some(Command::Compare));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["buyer-price", "show", "--formulas", "--format", "json"]);

        assert_eq!(cli.command, Some(Command::Show { formulas: true }));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["buyer-price", "--dealer-cost", "12,000"]);

        assert_eq!(cli.command, None);
        assert_eq!(cli.dealer_cost.as_deref(), Some("12,000"));
    }
}
