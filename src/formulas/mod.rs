//! # formulas
//!
//! Geometry, finance and statistics helper tools.
//!
//! Each tool takes plain numbers and returns a result type whose `Display`
//! renders the same two-decimal text the calculator shows. Raw text fields
//! are read with [`parse_field`] and [`parse_samples`].

pub mod finance;
pub mod geometry;
pub mod statistics;

use crate::error::{CalcError, CalcResult};

/// Reads a required numeric field.
///
/// # Errors
/// [`CalcError::InvalidInput`] naming `field` when the text is empty, is not
/// a number or is not finite.
pub fn parse_field(field: &str, text: &str) -> CalcResult<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CalcError::input(field, "value is required"));
    }
    let value: f64 = text.parse()
        .map_err(|_| CalcError::input(field, format!("\"{}\" is not a number", text)))?;
    require_finite(field, value)
}

/// Reads a comma-separated sample list.
///
/// Items that are not finite numbers are dropped, so `"1, x, 3"` reads as
/// `[1, 3]`.
pub fn parse_samples(text: &str) -> Vec<f64> {
    text.split(',')
        .filter_map(|item| item.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .collect()
}

/// Passes `value` through when it is finite.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::input(field, "not a finite number"))
    }
}
