//! Form-input parsing and rounding helpers shared across the core modules.
//!
//! The back-office screens submit quantities as free-text fields; a field
//! that does not parse as a finite number is a validation fault, and an
//! empty optional field means "absent", which is distinct from zero.

use crate::errors::{Error, Result};

/// Parses a required quantity field.
///
/// # Errors
/// Returns [`Error::InvalidNumber`] when the input is empty, not a number,
/// or not finite.
pub fn parse_quantity(input: &str) -> Result<f64> {
    let value: f64 = input.trim().parse().map_err(|_| Error::InvalidNumber {
        input: input.to_string(),
    })?;
    if !value.is_finite() {
        return Err(Error::InvalidNumber {
            input: input.to_string(),
        });
    }
    Ok(value)
}

/// Parses an optional quantity field: empty input is `None`, anything else
/// must parse as a finite number.
pub fn parse_optional_quantity(input: &str) -> Result<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_quantity(input).map(Some)
}

/// Rounds a money amount to 2 decimals, the resolution of sale totals.
#[must_use]
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds a stock quantity to 3 decimals, the resolution of material stock.
#[must_use]
pub fn round_stock(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
