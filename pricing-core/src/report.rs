//! Human-readable text for the result panel and the copy/export action.

use crate::calculations::{CalculationResult, freight_units};
use crate::format::{format_currency, format_grouped, format_one_decimal, format_percent, format_rate};
use crate::models::{FormulaLine, PricingInputs};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// The worked formula for one result line, e.g.
/// `Formula: $10,000 × 50% ÷ 100 = $5,000.00`.
pub fn formula_text(
    line: FormulaLine,
    inputs: &PricingInputs,
    result: &CalculationResult,
) -> String {
    match line {
        FormulaLine::BuyerBase => format!(
            "Formula: ${} × {} ÷ 100 = {}",
            format_grouped(inputs.dealer_cost()),
            format_percent(inputs.buyer_percentage()),
            format_currency(result.buyer_base)
        ),
        FormulaLine::TransactionFee => format!(
            "Formula: {} × {} ÷ 100 = {}",
            format_currency(result.buyer_base),
            format_percent(inputs.transaction_fee_percent()),
            format_currency(result.transaction_fee_amount)
        ),
        FormulaLine::Freight => format!(
            "Formula: ${} ÷ 1,000 × {} = {}",
            format_grouped(inputs.dealer_cost()),
            format_rate(inputs.freight_per_thousand()),
            format_currency(result.freight_amount)
        ),
    }
}

/// The always-visible hint under a result line. Buyer base has none.
pub fn detail_text(
    line: FormulaLine,
    inputs: &PricingInputs,
    result: &CalculationResult,
) -> Option<String> {
    match line {
        FormulaLine::BuyerBase => None,
        FormulaLine::TransactionFee => Some(format!(
            "{} of {} buyer base",
            format_percent(inputs.transaction_fee_percent()),
            format_currency(result.buyer_base)
        )),
        FormulaLine::Freight => Some(format!(
            "{} per $1,000 × {} units",
            format_rate(inputs.freight_per_thousand()),
            format_one_decimal(freight_units(inputs.dealer_cost()))
        )),
    }
}

/// Text copied by the "Copy Results" action.
pub fn export_text(
    inputs: &PricingInputs,
    result: &CalculationResult,
) -> String {
    let buyer_pct = format_percent(inputs.buyer_percentage());
    let fee_pct = format_percent(inputs.transaction_fee_percent());

    [
        "Buyer Purchase Price Calculation".to_string(),
        RULE.to_string(),
        format!("Total Dealer Cost: {}", format_currency(inputs.dealer_cost())),
        format!("Buyer Pays: {buyer_pct}"),
        format!("Transaction Fee: {fee_pct}"),
        format!(
            "Freight Contribution: {} per $1,000",
            format_rate(inputs.freight_per_thousand())
        ),
        String::new(),
        "Calculated Results:".to_string(),
        RULE.to_string(),
        format!("Buyer Base ({buyer_pct}): {}", format_currency(result.buyer_base)),
        format!(
            "Transaction Fee ({fee_pct}): {}",
            format_currency(result.transaction_fee_amount)
        ),
        format!(
            "Freight Contribution: {}",
            format_currency(result.freight_amount)
        ),
        String::new(),
        format!("TOTAL BUYER PRICE: {}", format_currency(result.total)),
    ]
    .join("\n")
}
