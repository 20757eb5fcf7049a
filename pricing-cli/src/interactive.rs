//! Line-oriented interactive session.
//!
//! Each line is one command. Every command that changes state is followed by
//! a fresh render of the result, so the output always reflects the last edit.

use std::io::{self, BufRead, Write};

use pricing_core::{FormulaLine, InputField, PricingSession};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::render;
use crate::utils::parse_decimal_or_zero;

const HELP: &str = "\
Commands:
  set <dealer-cost|buyer-percent|fee|freight> <value>
  reset
  add <fee> <freight> <name...>
  remove <n>                       (scenario position; presets 1-4 cannot be removed)
  formula <buyer-base|fee|freight>
  show | compare | what-if | export
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set(InputField, Decimal),
    Reset,
    Add {
        name: String,
        fee: Decimal,
        freight: Decimal,
    },
    Remove(usize),
    Formula(FormulaLine),
    Show,
    Compare,
    WhatIf,
    Export,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try `help`)")]
    Unknown(String),

    #[error("unknown field '{0}' (expected dealer-cost, buyer-percent, fee or freight)")]
    UnknownField(String),

    #[error("unknown formula '{0}' (expected buyer-base, fee or freight)")]
    UnknownFormula(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl SessionCommand {
    /// Parses one input line. Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };

        let command = match head {
            "set" => {
                let (Some(field), Some(value)) = (words.next(), words.next()) else {
                    return Err(CommandError::Usage("set <field> <value>"));
                };
                let field = InputField::parse(field)
                    .ok_or_else(|| CommandError::UnknownField(field.to_string()))?;
                Self::Set(field, parse_decimal_or_zero(value))
            }
            "reset" => Self::Reset,
            "add" => {
                let (Some(fee), Some(freight)) = (words.next(), words.next()) else {
                    return Err(CommandError::Usage("add <fee> <freight> <name...>"));
                };
                Self::Add {
                    fee: parse_decimal_or_zero(fee),
                    freight: parse_decimal_or_zero(freight),
                    name: words.collect::<Vec<_>>().join(" "),
                }
            }
            "remove" => {
                let index = words
                    .next()
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or(CommandError::Usage("remove <n>"))?;
                Self::Remove(index)
            }
            "formula" => {
                let Some(line) = words.next() else {
                    return Err(CommandError::Usage("formula <buyer-base|fee|freight>"));
                };
                Self::Formula(
                    FormulaLine::parse(line)
                        .ok_or_else(|| CommandError::UnknownFormula(line.to_string()))?,
                )
            }
            "show" => Self::Show,
            "compare" => Self::Compare,
            "what-if" => Self::WhatIf,
            "export" => Self::Export,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Applies one command and writes its output. Returns `false` on quit.
fn execute<W: Write>(
    session: &mut PricingSession,
    command: SessionCommand,
    out: &mut W,
) -> io::Result<bool> {
    debug!(?command, "session command");
    match command {
        SessionCommand::Set(field, value) => {
            let stored = session.set_field(field, value);
            if stored != value {
                writeln!(out, "{} clamped to {}", field.to_long_str(), stored)?;
            }
            writeln!(out, "{}", render::result_text(session))?;
        }
        SessionCommand::Reset => {
            session.reset();
            writeln!(out, "{}", render::result_text(session))?;
        }
        SessionCommand::Add { name, fee, freight } => {
            match session.add_scenario(&name, fee, freight) {
                Ok(scenario) => writeln!(out, "added scenario '{}'", scenario.name())?,
                // Blank names are dropped without complaint.
                Err(e) => debug!("scenario not added: {}", e),
            }
        }
        SessionCommand::Remove(n) => {
            let presets = session.scenarios().presets().len();
            match n
                .checked_sub(presets + 1)
                .map(|custom_index| session.remove_scenario(custom_index))
            {
                Some(Ok(removed)) => writeln!(out, "removed scenario '{}'", removed.name())?,
                Some(Err(e)) => writeln!(out, "{e}")?,
                None => writeln!(out, "preset scenarios cannot be removed")?,
            }
        }
        SessionCommand::Formula(line) => {
            session.toggle_formula(line);
            writeln!(out, "{}", render::result_text(session))?;
        }
        SessionCommand::Show => writeln!(out, "{}", render::result_text(session))?,
        SessionCommand::Compare => writeln!(
            out,
            "{}",
            render::comparison_text(
                session.inputs(),
                &session.result(),
                &session.scenario_rows()
            )
        )?,
        SessionCommand::WhatIf => writeln!(
            out,
            "{}",
            render::what_if_text(&session.result(), &session.what_if())
        )?,
        SessionCommand::Export => writeln!(out, "{}", session.export_text())?,
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs commands from `input` until EOF or `quit`.
pub fn run<R: BufRead, W: Write>(
    session: &mut PricingSession,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", render::result_text(session))?;
    for line in input.lines() {
        let line = line?;
        match SessionCommand::parse(&line) {
            Ok(Some(command)) => {
                if !execute(session, command, out)? {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(line = %line, "rejected session command");
                writeln!(out, "{e}")?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn run_script(
        session: &mut PricingSession,
        script: &str,
    ) -> String {
        let mut out = Vec::new();
        run(session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_set_coerces_garbage_to_zero() {
        assert_eq!(
            SessionCommand::parse("set fee abc"),
            Ok(Some(SessionCommand::Set(
                InputField::TransactionFeePercent,
                dec!(0)
            )))
        );
    }

    #[test]
    fn parse_add_joins_name_words() {
        assert_eq!(
            SessionCommand::parse("add 4 25 Dealer promo"),
            Ok(Some(SessionCommand::Add {
                name: "Dealer promo".to_string(),
                fee: dec!(4),
                freight: dec!(25),
            }))
        );
    }

    #[test]
    fn parse_rejects_unknown_input() {
        assert_eq!(SessionCommand::parse("   "), Ok(None));
        assert_eq!(
            SessionCommand::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("set discount 5"),
            Err(CommandError::UnknownField("discount".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("remove 0"),
            Err(CommandError::Usage("remove <n>"))
        );
    }

    #[test]
    fn set_reports_clamping() {
        let mut session = PricingSession::new();

        let output = run_script(&mut session, "set buyer-percent 150\n");

        assert!(output.contains("Buyer Pays % of Dealer Cost (%) clamped to 100"));
        assert_eq!(session.inputs().buyer_percentage(), dec!(100));

        let output = run_script(&mut session, "set freight 5000000000000\n");

        assert!(output.contains(
            "Buyer Freight Contribution ($ per $1,000 dealer cost) clamped to 1000000000000"
        ));
    }

    #[test]
    fn reset_keeps_custom_scenarios() {
        let mut session = PricingSession::new();

        run_script(
            &mut session,
            "set dealer-cost 20000\nadd 4 25 Promo\nreset\n",
        );

        assert_eq!(session.inputs().dealer_cost(), dec!(10000));
        assert_eq!(session.scenarios().custom().len(), 1);
    }

    #[test]
    fn blank_scenario_name_is_silently_ignored() {
        let mut session = PricingSession::new();

        let output = run_script(&mut session, "add 4 25\n");

        assert!(!output.contains("added scenario"));
        assert!(session.scenarios().custom().is_empty());
    }

    #[test]
    fn remove_uses_scenario_positions() {
        let mut session = PricingSession::new();

        let output = run_script(&mut session, "add 4 25 A\nadd 5 30 B\nremove 2\nremove 5\n");

        assert!(output.contains("preset scenarios cannot be removed"));
        assert!(output.contains("removed scenario 'A'"));
        assert_eq!(session.scenarios().custom().len(), 1);
        assert_eq!(session.scenarios().custom()[0].name(), "B");
    }

    #[test]
    fn quit_stops_processing() {
        let mut session = PricingSession::new();

        run_script(&mut session, "quit\nset fee 9\n");

        assert_eq!(session.inputs().transaction_fee_percent(), dec!(7));
    }

    #[test]
    fn formula_toggle_renders_formula() {
        let mut session = PricingSession::new();

        let output = run_script(&mut session, "formula fee\n");

        assert!(output.contains("Formula: $5,000.00 × 7% ÷ 100 = $350.00"));
    }
}
