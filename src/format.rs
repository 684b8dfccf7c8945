//! # format.rs
//!
//! Text rendering of results shown on the calculator display.

use crate::base;
use crate::error::CalcResult;
use crate::mode::NumeralBase;

/// Magnitude from which results switch to exponent notation.
const EXPONENT_ABOVE: f64 = 1.0e21;

/// Magnitude below which non-zero results switch to exponent notation.
const EXPONENT_BELOW: f64 = 1.0e-6;

/// Renders a number the way the calculator display shows it.
///
/// Uses the shortest text that reads back to the same value. Integers have
/// no fractional part, and very large or very small magnitudes use an
/// exponent with an explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    format!("{}", value)
}

/// Renders a result in the given numeral base.
///
/// Decimal results keep their fraction; other bases show the integer part.
///
/// # Errors
/// [`CalcError::InvalidExpression`](crate::error::CalcError::InvalidExpression)
/// when a non-decimal result cannot be represented as an `i64`.
pub fn format_in_base(value: f64, numeral: NumeralBase) -> CalcResult<String> {
    match numeral {
        NumeralBase::Decimal => Ok(format_number(value)),
        other => base::to_base(base::truncate_to_integer(value)?, other.radix()),
    }
}
