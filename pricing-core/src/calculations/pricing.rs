//! Buyer purchase price calculations.
//!
//! The buyer price is built from three components:
//!
//! | Component | Formula |
//! |-----------|---------|
//! | Buyer base | dealer cost × buyer % ÷ 100 |
//! | Transaction fee | buyer base × fee % ÷ 100 |
//! | Freight contribution | dealer cost ÷ 1,000 × freight per $1,000 |
//! | Total | buyer base + transaction fee + freight |
//!
//! Nothing here rounds. Amounts are exact decimals and only the display layer
//! ([`crate::format`]) rounds to cents.
//!
//! Scenario and what-if rows replace the transaction fee and freight with
//! their own values, but the buyer base always comes from the current inputs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pricing_core::PricingInputs;
//! use pricing_core::calculations::get_result;
//!
//! let result = get_result(&PricingInputs::default());
//!
//! assert_eq!(result.buyer_base, dec!(5000));
//! assert_eq!(result.transaction_fee_amount, dec!(350));
//! assert_eq!(result.freight_amount, dec!(500));
//! assert_eq!(result.total, dec!(5850));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::{PricingInputs, Scenario, ScenarioSet};

/// Fee deltas used by the what-if table, in display order.
pub const DEFAULT_WHAT_IF_DELTAS: [Decimal; 5] = [
    Decimal::from_parts(2, 0, 0, true, 0),
    Decimal::from_parts(1, 0, 0, true, 0),
    Decimal::ZERO,
    Decimal::ONE,
    Decimal::from_parts(2, 0, 0, false, 0),
];

/// Portion of the dealer cost allocated to the buyer before fees.
///
/// # Arguments
///
/// * `dealer_cost` - Total dealer cost in dollars
/// * `buyer_percentage` - Share of the dealer cost the buyer pays, `[0, 100]`
///
/// # Returns
///
/// `dealer_cost × buyer_percentage ÷ 100`, unrounded.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::buyer_base;
///
/// assert_eq!(buyer_base(dec!(10000), dec!(50)), dec!(5000));
/// ```
pub fn buyer_base(
    dealer_cost: Decimal,
    buyer_percentage: Decimal,
) -> Decimal {
    dealer_cost.saturating_mul(buyer_percentage) / Decimal::ONE_HUNDRED
}

/// Transaction fee charged on the buyer base.
///
/// # Arguments
///
/// * `base` - The buyer base, see [`buyer_base`]
/// * `fee_percent` - Transaction fee percentage
///
/// # Returns
///
/// `base × fee_percent ÷ 100`, unrounded.
pub fn transaction_fee_amount(
    base: Decimal,
    fee_percent: Decimal,
) -> Decimal {
    base.saturating_mul(fee_percent) / Decimal::ONE_HUNDRED
}

/// Freight contribution, charged per $1,000 of dealer cost.
///
/// # Arguments
///
/// * `dealer_cost` - Total dealer cost in dollars
/// * `freight_per_thousand` - Dollars charged per $1,000 of dealer cost
///
/// # Returns
///
/// `dealer_cost ÷ 1,000 × freight_per_thousand`, unrounded.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::freight_amount;
///
/// assert_eq!(freight_amount(dec!(10000), dec!(50)), dec!(500));
/// assert_eq!(freight_amount(dec!(2500), dec!(40)), dec!(100));
/// ```
pub fn freight_amount(
    dealer_cost: Decimal,
    freight_per_thousand: Decimal,
) -> Decimal {
    freight_units(dealer_cost).saturating_mul(freight_per_thousand)
}

/// Number of $1,000 units the freight contribution is charged on.
pub fn freight_units(dealer_cost: Decimal) -> Decimal {
    dealer_cost / Decimal::ONE_THOUSAND
}

/// Total buyer price. The buyer base is computed once and reused for the fee.
///
/// Arithmetic saturates at `Decimal::MAX` instead of overflowing. Clamped
/// [`PricingInputs`] never get near that bound.
///
/// # Arguments
///
/// * `dealer_cost` - Total dealer cost in dollars
/// * `buyer_percentage` - Share of the dealer cost the buyer pays
/// * `fee_percent` - Transaction fee percentage
/// * `freight_per_thousand` - Dollars charged per $1,000 of dealer cost
///
/// # Returns
///
/// The exact sum of buyer base, transaction fee and freight.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::total;
///
/// assert_eq!(total(dec!(10000), dec!(50), dec!(7), dec!(50)), dec!(5850));
/// ```
pub fn total(
    dealer_cost: Decimal,
    buyer_percentage: Decimal,
    fee_percent: Decimal,
    freight_per_thousand: Decimal,
) -> Decimal {
    let base = buyer_base(dealer_cost, buyer_percentage);
    base.saturating_add(transaction_fee_amount(base, fee_percent))
        .saturating_add(freight_amount(dealer_cost, freight_per_thousand))
}

/// Total with the scenario's fee and freight substituted for the current ones.
pub fn scenario_total(
    dealer_cost: Decimal,
    buyer_percentage: Decimal,
    scenario: &Scenario,
) -> Decimal {
    total(
        dealer_cost,
        buyer_percentage,
        scenario.transaction_fee_percent(),
        scenario.freight_per_thousand(),
    )
}

/// Signed change against the current total.
///
/// # Arguments
///
/// * `scenario_total` - Total of the scenario or what-if row
/// * `current_total` - Total of the current inputs
///
/// # Returns
///
/// `scenario_total - current_total`. Negative means cheaper.
pub fn difference(
    scenario_total: Decimal,
    current_total: Decimal,
) -> Decimal {
    scenario_total.saturating_sub(current_total)
}

/// Direction of a [`difference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceChange {
    Cheaper,
    Equal,
    MoreExpensive,
}

impl PriceChange {
    pub fn of(difference: Decimal) -> Self {
        if difference.is_zero() {
            Self::Equal
        } else if difference.is_sign_negative() {
            Self::Cheaper
        } else {
            Self::MoreExpensive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cheaper => "cheaper",
            Self::Equal => "equal",
            Self::MoreExpensive => "more expensive",
        }
    }
}

/// Derived amounts for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculationResult {
    pub buyer_base: Decimal,
    pub transaction_fee_amount: Decimal,
    pub freight_amount: Decimal,
    pub total: Decimal,
}

/// One row of the scenario comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioRow {
    pub scenario: Scenario,
    pub total: Decimal,
    pub difference: Decimal,
}

impl ScenarioRow {
    pub fn change(&self) -> PriceChange {
        PriceChange::of(self.difference)
    }
}

/// One row of the transaction fee what-if table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhatIfRow {
    pub delta_label: String,
    pub new_fee: Decimal,
    pub total: Decimal,
    pub difference: Decimal,
}

impl WhatIfRow {
    pub fn change(&self) -> PriceChange {
        PriceChange::of(self.difference)
    }
}

const CURRENT_LABEL: &str = "Current";

/// Label for a fee delta: `+2%`, `-1%`, or `Current` for zero.
pub fn delta_label(delta: Decimal) -> String {
    let delta = delta.normalize();
    if delta.is_zero() {
        CURRENT_LABEL.to_string()
    } else if delta.is_sign_positive() {
        format!("+{delta}%")
    } else {
        format!("{delta}%")
    }
}

/// Computes the result record for the current inputs.
pub fn get_result(inputs: &PricingInputs) -> CalculationResult {
    let base = buyer_base(inputs.dealer_cost(), inputs.buyer_percentage());
    let fee = transaction_fee_amount(base, inputs.transaction_fee_percent());
    let freight = freight_amount(inputs.dealer_cost(), inputs.freight_per_thousand());
    let result = CalculationResult {
        buyer_base: base,
        transaction_fee_amount: fee,
        freight_amount: freight,
        total: base.saturating_add(fee).saturating_add(freight),
    };

    debug!(
        dealer_cost = %inputs.dealer_cost(),
        buyer_percentage = %inputs.buyer_percentage(),
        transaction_fee_percent = %inputs.transaction_fee_percent(),
        freight_per_thousand = %inputs.freight_per_thousand(),
        total = %result.total,
        "recomputed buyer price"
    );

    result
}

/// Comparison rows for every scenario, in set order.
pub fn get_scenario_rows(
    inputs: &PricingInputs,
    scenarios: &ScenarioSet,
) -> Vec<ScenarioRow> {
    let current = get_result(inputs).total;

    scenarios
        .iter()
        .map(|scenario| {
            let total = scenario_total(inputs.dealer_cost(), inputs.buyer_percentage(), scenario);
            ScenarioRow {
                scenario: scenario.clone(),
                total,
                difference: difference(total, current),
            }
        })
        .collect()
}

/// What-if rows for each fee delta. `new_fee` is `max(0, fee + delta)`; the
/// freight stays at its current value.
pub fn get_what_if(
    inputs: &PricingInputs,
    fee_deltas: &[Decimal],
) -> Vec<WhatIfRow> {
    let current = get_result(inputs).total;

    fee_deltas
        .iter()
        .map(|&delta| {
            let new_fee = inputs
                .transaction_fee_percent()
                .saturating_add(delta)
                .max(Decimal::ZERO);
            let total = total(
                inputs.dealer_cost(),
                inputs.buyer_percentage(),
                new_fee,
                inputs.freight_per_thousand(),
            );
            WhatIfRow {
                delta_label: delta_label(delta),
                new_fee,
                total,
                difference: difference(total, current),
            }
        })
        .collect()
}
