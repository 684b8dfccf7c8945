//! # error.rs
//!
//! Error taxonomy shared by every calculator component.
//!
//! All variants are local and recoverable: they describe a bad user input or
//! an equation without a usable answer, never a broken process.

use thiserror::Error;

/// Result type for calculator operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors produced by evaluation, conversion and the helper tools.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The expression could not be lexed, parsed or evaluated to a finite value.
    #[error("Invalid expression: {message}")]
    InvalidExpression {
        /// What went wrong, with the offending lexeme position when known.
        message: String,
    },

    /// The text is not an integer literal of the requested base.
    #[error("Invalid base-{base} literal \"{literal}\"")]
    InvalidLiteral {
        /// The rejected text.
        literal: String,
        /// Radix the text was read in.
        base: u32,
    },

    /// Only bases 2, 8, 10 and 16 are supported.
    #[error("Unsupported base {base}")]
    UnsupportedBase {
        /// The requested radix.
        base: u32,
    },

    /// The unit name is missing from the category's table.
    #[error("Unknown {category} unit \"{unit}\"")]
    UnknownUnit {
        /// The rejected unit name.
        unit: String,
        /// Category that was searched.
        category: String,
    },

    /// The leading coefficient is zero, so the equation has no single solution form.
    #[error("Invalid equation ({coefficient} cannot be 0)")]
    DegenerateEquation {
        /// Name of the coefficient that was zero.
        coefficient: &'static str,
    },

    /// The 2x2 system has a zero determinant.
    #[error("No unique solution (parallel or coincident lines)")]
    NoUniqueSolution,

    /// A required numeric field is absent or non-numeric, or a divisor is zero.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// Short human readable reason.
        reason: String,
    },
}

impl CalcError {
    /// Shorthand for [`CalcError::InvalidExpression`].
    pub fn expression<S: Into<String>>(message: S) -> Self {
        Self::InvalidExpression { message: message.into() }
    }

    /// Shorthand for [`CalcError::InvalidInput`].
    pub fn input<F, R>(field: F, reason: R) -> Self
    where
        F: Into<String>,
        R: Into<String>,
    {
        Self::InvalidInput { field: field.into(), reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CalcError::expression("Unknown string @ at 0..1").to_string(),
            "Invalid expression: Unknown string @ at 0..1"
        );
        assert_eq!(
            CalcError::InvalidLiteral { literal: "12".into(), base: 2 }.to_string(),
            "Invalid base-2 literal \"12\""
        );
        assert_eq!(CalcError::UnsupportedBase { base: 3 }.to_string(), "Unsupported base 3");
        assert_eq!(
            CalcError::DegenerateEquation { coefficient: "a" }.to_string(),
            "Invalid equation (a cannot be 0)"
        );
        assert_eq!(
            CalcError::input("radius", "not a number").to_string(),
            "Invalid input for radius: not a number"
        );
    }
}
