//! # base.rs
//!
//! Integer literal conversion between binary, octal, decimal and hexadecimal.
//!
//! Rendering uses uppercase hexadecimal digits and a leading `-` for negative
//! values, so that `from_base(&to_base(n, b)?, b)? == n` for every `i64`.

use num_traits::ToPrimitive;

use crate::error::{CalcError, CalcResult};
use crate::mode::NumeralBase;

/// Checks that `base` is one of the supported radices.
fn check_base(base: u32) -> CalcResult<NumeralBase> {
    NumeralBase::from_radix(base).ok_or(CalcError::UnsupportedBase { base })
}

/// Renders `n` in `base` (2, 8, 10 or 16).
///
/// # Errors
/// [`CalcError::UnsupportedBase`] for any other radix.
pub fn to_base(n: i64, base: u32) -> CalcResult<String> {
    let magnitude = n.unsigned_abs();
    let digits = match check_base(base)? {
        NumeralBase::Binary => format!("{:b}", magnitude),
        NumeralBase::Octal => format!("{:o}", magnitude),
        NumeralBase::Decimal => format!("{}", magnitude),
        NumeralBase::Hexadecimal => format!("{:X}", magnitude),
    };
    if n < 0 {
        Ok(format!("-{}", digits))
    } else {
        Ok(digits)
    }
}

/// Parses `s` as an integer literal in `base`.
///
/// An optional leading `+` or `-` is accepted; hexadecimal digits may be in
/// either case. Surrounding whitespace is ignored.
///
/// # Errors
/// - [`CalcError::UnsupportedBase`] for an unsupported radix.
/// - [`CalcError::InvalidLiteral`] if the text is empty, contains characters
///   outside the digit set of the base, or does not fit in an `i64`.
pub fn from_base(s: &str, base: u32) -> CalcResult<i64> {
    let numeral = check_base(base)?;
    let text = s.trim();
    let invalid = || CalcError::InvalidLiteral { literal: s.to_string(), base };

    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    // a decimal point is a valid keystroke in decimal mode but never part of an integer literal
    if digits.is_empty() || !digits.chars().all(|ch| ch != '.' && numeral.accepts(ch)) {
        return Err(invalid());
    }

    i64::from_str_radix(text, base).map_err(|_| invalid())
}

/// Truncates a floating point result to an integer for base rendering.
///
/// # Errors
/// [`CalcError::InvalidExpression`] when the value is NaN, infinite or out of
/// the `i64` range.
pub fn truncate_to_integer(value: f64) -> CalcResult<i64> {
    value.to_i64()
        .ok_or_else(|| CalcError::expression(format!("{} cannot be shown as an integer", value)))
}

/// Reads displayed text in `numeral` as an integer.
///
/// Decimal text may carry a fraction or an exponent; the value is truncated.
pub fn read_integer(text: &str, numeral: NumeralBase) -> CalcResult<i64> {
    match numeral {
        NumeralBase::Decimal => {
            let parsed: f64 = text.trim().parse()
                .map_err(|_| CalcError::InvalidLiteral { literal: text.to_string(), base: 10 })?;
            truncate_to_integer(parsed)
        },
        other => from_base(text, other.radix()),
    }
}

/// Re-renders a displayed value when the numeral base changes.
///
/// `text` is read in `from` (decimal text may carry a fractional part, which
/// is truncated) and rendered in `to`.
pub fn convert_display(text: &str, from: NumeralBase, to: NumeralBase) -> CalcResult<String> {
    to_base(read_integer(text, from)?, to.radix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_base() {
        assert_eq!(to_base(10, 2).unwrap(), "1010");
        assert_eq!(to_base(8, 8).unwrap(), "10");
        assert_eq!(to_base(255, 16).unwrap(), "FF");
        assert_eq!(to_base(-255, 16).unwrap(), "-FF");
        assert_eq!(to_base(0, 2).unwrap(), "0");
        assert_eq!(to_base(-42, 10).unwrap(), "-42");
        assert_eq!(to_base(i64::MIN, 16).unwrap(), "-8000000000000000");
    }

    #[test]
    fn test_to_base_unsupported() {
        assert_eq!(to_base(5, 3), Err(CalcError::UnsupportedBase { base: 3 }));
        assert_eq!(to_base(5, 0), Err(CalcError::UnsupportedBase { base: 0 }));
    }

    #[test]
    fn test_from_base() {
        assert_eq!(from_base("1010", 2), Ok(10));
        assert_eq!(from_base("777", 8), Ok(511));
        assert_eq!(from_base("ff", 16), Ok(255));
        assert_eq!(from_base("FF", 16), Ok(255));
        assert_eq!(from_base("-101", 2), Ok(-5));
        assert_eq!(from_base("+12", 10), Ok(12));
        assert_eq!(from_base(" 42 ", 10), Ok(42));
    }

    #[test]
    fn test_from_base_invalid_literal() {
        for (text, base) in [("102", 2), ("8", 8), ("G", 16), ("", 10), ("-", 2), ("1.5", 10), ("10+1", 2)] {
            assert_eq!(
                from_base(text, base),
                Err(CalcError::InvalidLiteral { literal: text.to_string(), base }),
                "{text} in base {base}",
            );
        }
        // overflow
        assert!(matches!(from_base("FFFFFFFFFFFFFFFFF", 16), Err(CalcError::InvalidLiteral { .. })));
    }

    #[test]
    fn test_from_base_unsupported() {
        assert_eq!(from_base("12", 12), Err(CalcError::UnsupportedBase { base: 12 }));
    }

    #[test]
    fn test_truncate_to_integer() {
        assert_eq!(truncate_to_integer(2.9), Ok(2));
        assert_eq!(truncate_to_integer(-2.9), Ok(-2));
        assert!(truncate_to_integer(f64::NAN).is_err());
        assert!(truncate_to_integer(f64::INFINITY).is_err());
        assert!(truncate_to_integer(1.0e30).is_err());
    }

    #[test]
    fn test_read_integer() {
        assert_eq!(read_integer("-7.9", NumeralBase::Decimal), Ok(-7));
        assert_eq!(read_integer("1e3", NumeralBase::Decimal), Ok(1000));
        assert_eq!(read_integer("7F", NumeralBase::Hexadecimal), Ok(127));
        assert!(read_integer("7F", NumeralBase::Decimal).is_err());
    }

    #[test]
    fn test_convert_display() {
        assert_eq!(convert_display("10", NumeralBase::Decimal, NumeralBase::Binary).unwrap(), "1010");
        assert_eq!(convert_display("12.75", NumeralBase::Decimal, NumeralBase::Hexadecimal).unwrap(), "C");
        assert_eq!(convert_display("1010", NumeralBase::Binary, NumeralBase::Octal).unwrap(), "12");
        assert_eq!(convert_display("FF", NumeralBase::Hexadecimal, NumeralBase::Decimal).unwrap(), "255");
        assert!(convert_display("Error", NumeralBase::Decimal, NumeralBase::Binary).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_trip(n in any::<i64>(), base in prop::sample::select(vec![2u32, 8, 10, 16])) {
            let text = to_base(n, base).unwrap();
            prop_assert_eq!(from_base(&text, base).unwrap(), n);
        }
    }
}
