use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes the
/// thousands separators, a trailing `%` and a `$` directly after the optional
/// leading minus sign.
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    format!("{sign}{}", rest.trim().replace(',', ""))
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`), a `$` prefix and
/// a `%` suffix. Empty or whitespace-only input is treated as 0.
/// Returns an error when the input is non-empty but not parseable.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseDecimalError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses a string into a [`Decimal`], coercing anything unparseable to 0.
///
/// This is the input boundary for calculator fields: the core never sees text
/// and never rejects a number.
pub fn parse_decimal_or_zero(s: &str) -> Decimal {
    parse_decimal(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "{}; using 0", e);
        Decimal::ZERO
    })
}
