//! Amount parsing shared by the bill input pipeline.
//!
//! Bill text is parsed through [`Decimal`] so that what the user typed is
//! read exactly before it is handed to the floating-point calculator.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Error returned when bill text is not a usable amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The text is not a decimal number.
    #[error("invalid amount '{input}': {reason}")]
    Invalid { input: String, reason: String },

    /// The text is a number below zero.
    #[error("amount '{0}' is negative")]
    Negative(String),

    /// The number does not fit in an `f64`.
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

/// Trims whitespace and drops commas used as thousands separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses bill text into a non-negative amount.
///
/// Empty or whitespace-only input is treated as 0.
///
/// # Examples
///
/// ```
/// use tip_core::calculations::parse_amount;
///
/// assert_eq!(parse_amount("1,234.50"), Ok(1234.5));
/// assert_eq!(parse_amount(""), Ok(0.0));
/// assert!(parse_amount("abc").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<f64, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(0.0);
    }

    let value = Decimal::from_str(&normalized).map_err(|e| ParseAmountError::Invalid {
        input: s.to_string(),
        reason: e.to_string(),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ParseAmountError::Negative(s.to_string()));
    }

    value
        .to_f64()
        .ok_or_else(|| ParseAmountError::OutOfRange(s.to_string()))
}

/// Parses bill text, falling back to 0 for anything unusable.
pub fn amount_or_zero(s: &str) -> f64 {
    parse_amount(s).unwrap_or_else(|error| {
        tracing::warn!(input = %s, %error, "unparsable bill text treated as zero");
        0.0
    })
}
