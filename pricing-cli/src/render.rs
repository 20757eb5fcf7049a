//! Terminal and JSON rendering of the calculator outputs.

use pricing_core::format::{
    NEUTRAL_MARKER, format_currency, format_difference_between, format_percent, format_rate,
};
use pricing_core::report::detail_text;
use pricing_core::{
    CalculationResult, FormulaLine, PricingInputs, PricingSession, ScenarioRow, WhatIfRow,
};
use rust_decimal::Decimal;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Plain text tables
// ---------------------------------------------------------------------------

fn render_row(
    cells: &[&str],
    widths: &[usize],
) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Left-aligned table with a header rule. Widths are measured in chars so the
/// `—` marker lines up.
fn render_table(
    headers: &[&str],
    rows: &[Vec<String>],
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![render_row(headers, &widths)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(render_row(&cells, &widths));
    }
    out.join("\n")
}

fn result_line(
    label: &str,
    amount: Decimal,
) -> String {
    format!("{label:<28}{:>14}", format_currency(amount))
}

/// The "Calculated Results" panel, including detail hints and any formulas
/// toggled on in the session.
pub fn result_text(session: &PricingSession) -> String {
    let inputs = session.inputs();
    let result = session.result();
    let lines_for = |line: FormulaLine, label: String, amount: Decimal| {
        let mut lines = vec![result_line(&label, amount)];
        if let Some(detail) = detail_text(line, inputs, &result) {
            lines.push(format!("  {detail}"));
        }
        if let Some(formula) = session.visible_formula(line) {
            lines.push(format!("  {formula}"));
        }
        lines
    };

    let mut out = vec!["Calculated Results".to_string()];
    out.extend(lines_for(
        FormulaLine::BuyerBase,
        format!(
            "Buyer Base (at {}):",
            format_percent(inputs.buyer_percentage())
        ),
        result.buyer_base,
    ));
    out.extend(lines_for(
        FormulaLine::TransactionFee,
        format!(
            "Transaction Fee ({}):",
            format_percent(inputs.transaction_fee_percent())
        ),
        result.transaction_fee_amount,
    ));
    out.extend(lines_for(
        FormulaLine::Freight,
        "Freight Contribution:".to_string(),
        result.freight_amount,
    ));
    out.push(result_line("TOTAL BUYER PRICE:", result.total));
    out.join("\n")
}

/// Scenario comparison table. The first row is always the current
/// configuration with the neutral marker as its difference. Differences are
/// taken between the totals as displayed.
pub fn comparison_text(
    inputs: &PricingInputs,
    result: &CalculationResult,
    rows: &[ScenarioRow],
) -> String {
    let mut cells = vec![vec![
        "Current".to_string(),
        format_percent(inputs.transaction_fee_percent()),
        format_rate(inputs.freight_per_thousand()),
        format_currency(result.total),
        NEUTRAL_MARKER.to_string(),
    ]];
    cells.extend(rows.iter().map(|row| {
        vec![
            row.scenario.name().to_string(),
            format_percent(row.scenario.transaction_fee_percent()),
            format_rate(row.scenario.freight_per_thousand()),
            format_currency(row.total),
            format_difference_between(row.total, result.total),
        ]
    }));

    render_table(
        &[
            "Scenario",
            "Transaction Fee %",
            "Freight ($ per $1,000)",
            "Total Buyer Price",
            "Difference vs Current",
        ],
        &cells,
    )
}

/// What-if table for transaction fee changes.
pub fn what_if_text(
    result: &CalculationResult,
    rows: &[WhatIfRow],
) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.delta_label.clone(),
                format_percent(row.new_fee),
                format_currency(row.total),
                format_difference_between(row.total, result.total),
            ]
        })
        .collect();

    render_table(
        &["Fee Change", "New Fee %", "Total Price", "Price Change"],
        &cells,
    )
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ResultReport<'a> {
    inputs: &'a PricingInputs,
    result: CalculationResult,
    formulas: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ComparisonReport<'a> {
    current_total: Decimal,
    rows: Vec<RowReport<'a>>,
}

#[derive(Debug, Serialize)]
struct RowReport<'a> {
    #[serde(flatten)]
    row: &'a ScenarioRow,
    change: &'static str,
}

#[derive(Debug, Serialize)]
struct WhatIfReport<'a> {
    #[serde(flatten)]
    row: &'a WhatIfRow,
    change: &'static str,
}

pub fn result_json(session: &PricingSession) -> serde_json::Result<String> {
    let formulas = FormulaLine::ALL
        .iter()
        .filter_map(|line| session.visible_formula(*line))
        .collect();
    serde_json::to_string_pretty(&ResultReport {
        inputs: session.inputs(),
        result: session.result(),
        formulas,
    })
}

pub fn comparison_json(
    result: &CalculationResult,
    rows: &[ScenarioRow],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ComparisonReport {
        current_total: result.total,
        rows: rows
            .iter()
            .map(|row| RowReport {
                row,
                change: row.change().as_str(),
            })
            .collect(),
    })
}

pub fn what_if_json(rows: &[WhatIfRow]) -> serde_json::Result<String> {
    let rows: Vec<WhatIfReport<'_>> = rows
        .iter()
        .map(|row| WhatIfReport {
            row,
            change: row.change().as_str(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use pricing_core::{InputField, Scenario};

    #[test]
    fn result_text_for_baseline() {
        let session = PricingSession::new();

        let text = result_text(&session);

        assert!(text.contains("Buyer Base (at 50%):"));
        assert!(text.contains("$5,000.00"));
        assert!(text.contains("  7% of $5,000.00 buyer base"));
        assert!(text.contains("  $50 per $1,000 × 10.0 units"));
        assert!(text.ends_with("$5,850.00"));
        assert!(!text.contains("Formula:"));
    }

    #[test]
    fn result_text_shows_toggled_formula_only() {
        let mut session = PricingSession::new();
        session.toggle_formula(FormulaLine::Freight);

        let text = result_text(&session);

        assert!(text.contains("  Formula: $10,000 ÷ 1,000 × $50 = $500.00"));
        assert_eq!(text.matches("Formula:").count(), 1);
    }

    #[test]
    fn comparison_text_starts_with_current_row() {
        let session = PricingSession::new();

        let text = comparison_text(
            session.inputs(),
            &session.result(),
            &session.scenario_rows(),
        );
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7); // header, rule, current, 4 presets
        assert!(lines[2].starts_with("Current"));
        assert!(lines[2].ends_with(NEUTRAL_MARKER));
        assert!(lines[3].starts_with("Standard"));
        assert!(lines[3].ends_with(NEUTRAL_MARKER));
        assert!(lines[6].starts_with("No Freight"));
        assert!(lines[6].ends_with("-$500.00"));
    }

    #[test]
    fn what_if_text_for_baseline() {
        let session = PricingSession::new();

        let text = what_if_text(&session.result(), &session.what_if());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].split_whitespace().next(), Some("Fee"));
        assert!(lines[2].starts_with("-2%"));
        assert!(lines[2].ends_with("-$100.00"));
        assert!(lines[4].starts_with("Current"));
        assert!(lines[4].ends_with(NEUTRAL_MARKER));
        assert!(lines[6].starts_with("+2%"));
        assert!(lines[6].contains("$5,950.00"));
        assert!(lines[6].ends_with("+$100.00"));
    }

    #[test]
    fn comparison_difference_agrees_with_displayed_totals() {
        let inputs = PricingInputs::default();
        let current = CalculationResult {
            buyer_base: dec!(0.004),
            transaction_fee_amount: dec!(0),
            freight_amount: dec!(0),
            total: dec!(0.004),
        };
        let row = |name: &str, total| ScenarioRow {
            scenario: Scenario::new(name, dec!(7), dec!(50)).unwrap(),
            total,
            difference: total - current.total,
        };

        let text = comparison_text(
            &inputs,
            &current,
            &[row("Up a cent", dec!(0.006)), row("Same cent", dec!(0.0049))],
        );
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[2].contains("$0.00"));
        assert!(lines[3].contains("$0.01"));
        assert!(lines[3].ends_with("+$0.01"));
        assert!(lines[4].contains("$0.00"));
        assert!(lines[4].ends_with(NEUTRAL_MARKER));
    }

    #[test]
    fn comparison_json_carries_change_labels() {
        let mut session = PricingSession::new();
        session.set_field(InputField::TransactionFeePercent, dec!(5));

        let json = comparison_json(&session.result(), &session.scenario_rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let current: Decimal = value["current_total"].as_str().unwrap().parse().unwrap();
        assert_eq!(current, dec!(5750));
        assert_eq!(value["rows"][0]["scenario"]["name"], "Standard");
        assert_eq!(value["rows"][0]["change"], "more expensive");
        assert_eq!(value["rows"][1]["change"], "equal");
        assert_eq!(value["rows"][3]["change"], "cheaper");
    }

    #[test]
    fn what_if_json_has_five_rows() {
        let session = PricingSession::new();

        let json = what_if_json(&session.what_if()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(5));
        assert_eq!(value[4]["delta_label"], "+2%");
        assert_eq!(value[4]["new_fee"], "9");
    }
}
