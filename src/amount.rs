//! Monetary amount parsing and rounding.
//!
//! The balance file and user bet input both carry decimal strings that may
//! use either `.` or `,` as the decimal separator depending on the locale
//! that wrote them. Everything is normalized here; the rest of the crate
//! only ever sees canonical two-decimal values.

use crate::errors::AmountParseError;

/// Round a monetary value to two decimal places.
///
/// Applied after every balance mutation and payout computation so stored
/// and displayed values never drift below cent precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a decimal amount, accepting `.` or `,` as the decimal separator.
///
/// Rejects empty input, negative values, and anything with more than one
/// separator. Thousands grouping is intentionally not supported.
pub fn parse_amount(input: &str) -> Result<f64, AmountParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let separators = trimmed.chars().filter(|c| *c == '.' || *c == ',').count();
    if separators > 1 {
        return Err(AmountParseError::MultipleSeparators(trimmed.to_string()));
    }

    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized
        .parse()
        .map_err(|_| AmountParseError::NotANumber(trimmed.to_string()))?;

    if !value.is_finite() {
        return Err(AmountParseError::NotANumber(trimmed.to_string()));
    }
    if value < 0.0 {
        return Err(AmountParseError::Negative(trimmed.to_string()));
    }

    Ok(value)
}

/// Canonical two-decimal, dot-separated rendering of an amount.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round2(value))
}
