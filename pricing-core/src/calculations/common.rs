//! Common utility functions for pricing calculations.
//!
//! This module provides shared functionality used by the calculator and the
//! formatting layer, including rounding and the input clamping policy.

use rust_decimal::Decimal;
use tracing::warn;

/// Rounds to cents, with exact half cents going away from zero.
///
/// Amounts are kept exact through every calculation and only pass through
/// here when they are displayed or compared for display.
///
/// # Arguments
///
/// * `value` - The exact amount to round
///
/// # Returns
///
/// The amount rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(5350.004)), dec!(5350.00));
/// assert_eq!(round_half_up(dec!(361.875)), dec!(361.88));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to be non-negative.
///
/// # Arguments
///
/// * `field` - Field name, only used for the log record emitted on adjustment
/// * `value` - The raw value
///
/// # Returns
///
/// `value`, or 0 when `value` is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::clamp_non_negative;
///
/// assert_eq!(clamp_non_negative("dealer_cost", dec!(-10)), dec!(0));
/// assert_eq!(clamp_non_negative("dealer_cost", dec!(12500)), dec!(12500));
/// ```
pub fn clamp_non_negative(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "negative value clamped to 0");
        return Decimal::ZERO;
    }
    value
}

/// Clamps a value to the closed range `[0, max]`.
///
/// # Arguments
///
/// * `field` - Field name, only used for the log record emitted on adjustment
/// * `value` - The raw value
/// * `max` - Inclusive upper bound
///
/// # Returns
///
/// `value` limited to `[0, max]`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::clamp_range;
///
/// assert_eq!(clamp_range("freight_per_thousand", dec!(5000), dec!(1000)), dec!(1000));
/// assert_eq!(clamp_range("freight_per_thousand", dec!(-1), dec!(1000)), dec!(0));
/// assert_eq!(clamp_range("freight_per_thousand", dec!(80), dec!(1000)), dec!(80));
/// ```
pub fn clamp_range(
    field: &'static str,
    value: Decimal,
    max: Decimal,
) -> Decimal {
    if value > max {
        warn!(field, value = %value, max = %max, "value above maximum clamped");
        return max;
    }
    clamp_non_negative(field, value)
}

/// Clamps a percentage to the closed range `[0, 100]`.
///
/// # Arguments
///
/// * `field` - Field name, only used for the log record emitted on adjustment
/// * `value` - The raw percentage
///
/// # Returns
///
/// `value` limited to `[0, 100]`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::clamp_percent;
///
/// assert_eq!(clamp_percent("buyer_percentage", dec!(150)), dec!(100));
/// assert_eq!(clamp_percent("transaction_fee_percent", dec!(-5)), dec!(0));
/// ```
pub fn clamp_percent(
    field: &'static str,
    value: Decimal,
) -> Decimal {
    clamp_range(field, value, Decimal::ONE_HUNDRED)
}
