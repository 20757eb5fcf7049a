//! Display formatting for amounts and percentages.
//!
//! Currency is always `$` prefixed, grouped by thousands and shown with two
//! decimals. Rounding is half-up (midpoint away from zero) through
//! [`round_half_up`], for single results and comparison differences alike, so a
//! difference that rounds to zero cents renders as [`NEUTRAL_MARKER`] and never
//! as `+$0.00` or `-$0.00`.
//!
//! In a table, [`format_difference_between`] takes the difference of the two
//! displayed totals, so the difference column always agrees with the totals
//! printed next to it.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Shown in place of a difference that is zero at display precision.
pub const NEUTRAL_MARKER: &str = "—";

/// Groups the digits of a non-negative integer string by thousands.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Splits the absolute value of `value` into grouped integer part and fraction.
fn grouped_parts(value: Decimal) -> (String, Option<String>) {
    let text = value.abs().to_string();
    match text.split_once('.') {
        Some((int, frac)) => (group_thousands(int), Some(frac.to_string())),
        None => (group_thousands(&text), None),
    }
}

/// Formats an amount as currency, e.g. `$1,234.56` or `-$500.00`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(5850)), "$5,850.00");
/// assert_eq!(format_currency(dec!(1234567.005)), "$1,234,567.01");
/// assert_eq!(format_currency(dec!(-500)), "-$500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);

    let (int, frac) = grouped_parts(rounded);
    let frac = frac.unwrap_or_else(|| "00".to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${int}.{frac}")
    } else {
        format!("${int}.{frac}")
    }
}

/// Formats a signed difference: `+$100.00`, `-$500.00`, or [`NEUTRAL_MARKER`]
/// when the amount rounds to zero cents.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::format::{NEUTRAL_MARKER, format_difference};
///
/// assert_eq!(format_difference(dec!(100)), "+$100.00");
/// assert_eq!(format_difference(dec!(-500)), "-$500.00");
/// assert_eq!(format_difference(dec!(0)), NEUTRAL_MARKER);
/// ```
pub fn format_difference(value: Decimal) -> String {
    let rounded = round_half_up(value);
    if rounded.is_zero() {
        return NEUTRAL_MARKER.to_string();
    }
    let sign = if rounded.is_sign_negative() { '-' } else { '+' };
    format!("{sign}{}", format_currency(rounded.abs()))
}

/// Formats the difference between two totals as they are displayed: both
/// are rounded to cents first, then subtracted.
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::format::{NEUTRAL_MARKER, format_difference_between};
///
/// // $0.01 against $0.00
/// assert_eq!(format_difference_between(dec!(0.006), dec!(0.004)), "+$0.01");
/// // $0.01 against $0.01
/// assert_eq!(format_difference_between(dec!(0.014), dec!(0.005)), NEUTRAL_MARKER);
/// ```
pub fn format_difference_between(
    total: Decimal,
    current_total: Decimal,
) -> String {
    format_difference(round_half_up(total).saturating_sub(round_half_up(current_total)))
}

/// Formats a percentage without trailing zeros: `7%`, `7.5%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

/// Formats a plain number with thousands separators and up to three
/// fraction digits, trailing zeros dropped: `10,000`, `12,500.5`.
pub fn format_grouped(value: Decimal) -> String {
    let trimmed = value
        .round_dp_with_strategy(3, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let (int, frac) = grouped_parts(trimmed);
    let sign = if trimmed.is_sign_negative() && !trimmed.is_zero() {
        "-"
    } else {
        ""
    };
    match frac {
        Some(frac) => format!("{sign}{int}.{frac}"),
        None => format!("{sign}{int}"),
    }
}

/// Formats a per-$1,000 rate as a whole-dollar style amount: `$50`, `$42.5`.
pub fn format_rate(value: Decimal) -> String {
    format!("${}", format_grouped(value))
}

/// Formats a number with exactly one decimal place, e.g. `10.0`.
pub fn format_one_decimal(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded.to_string()
}
