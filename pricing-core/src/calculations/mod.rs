//! Buyer purchase price calculation modules.
//!
//! This module provides the pure arithmetic behind the calculator: the three
//! price components, scenario comparison, and the transaction fee what-if table.

pub mod common;
pub mod pricing;

pub use pricing::{
    CalculationResult, DEFAULT_WHAT_IF_DELTAS, PriceChange, ScenarioRow, WhatIfRow, buyer_base,
    delta_label, difference, freight_amount, freight_units, get_result, get_scenario_rows,
    get_what_if, scenario_total, total, transaction_fee_amount,
};
