//! # evaluator.rs
//!
//! Entry point of the expression pipeline.
//!
//! A decimal expression goes through the lexer, the degree-mode parenthesis
//! balancing, the shunting-yard parser and tree evaluation. Any other numeral
//! base only accepts a single integer literal.
//!
//! # Example
//! ```rust
//! use calcpad::{evaluate, AngleMode, NumeralBase};
//!
//! let value = evaluate("2 + 3 × 4", NumeralBase::Decimal, AngleMode::Degrees).unwrap();
//! assert_eq!(value, 14.0);
//!
//! let value = evaluate("FF", NumeralBase::Hexadecimal, AngleMode::Degrees).unwrap();
//! assert_eq!(value, 255.0);
//! ```

use tracing::{debug, trace};

use crate::base;
use crate::error::{CalcError, CalcResult};
use crate::lexer;
use crate::mode::{AngleMode, NumeralBase};
use crate::parser::{self, AstNode};

/// Parses `expression` into a tree without evaluating it.
///
/// Useful to inspect how an expression is read under `angle`, e.g. whether
/// trailing parentheses were appended.
pub fn parse(expression: &str, angle: AngleMode) -> CalcResult<AstNode> {
    let mut lexemes = lexer::from(expression);
    trace!(tokens = ?lexemes.iter().map(|l| l.text()).collect::<Vec<_>>(), "lexed expression");

    let appended = parser::balance_parentheses(&mut lexemes, angle);
    if appended > 0 {
        trace!(appended, "closed open degree-converted calls");
    }

    let ast = AstNode::from(&lexemes, angle)?;
    debug!(%ast, "parsed expression");
    Ok(ast)
}

/// Evaluates a calculator expression.
///
/// # Arguments
/// * `expression` - Text in calculator syntax.
/// * `base` - Numeral base of the input. Non-decimal bases read the whole
///   trimmed text as one integer literal.
/// * `angle` - Unit of trigonometric arguments and inverse results.
///
/// # Errors
/// [`CalcError::InvalidExpression`] when the text cannot be parsed, an
/// operator rejects its operands or the value is not finite.
pub fn evaluate(expression: &str, base: NumeralBase, angle: AngleMode) -> CalcResult<f64> {
    if base != NumeralBase::Decimal {
        let value = base::from_base(expression, base.radix())
            .map_err(|e| CalcError::expression(e.to_string()))?;
        debug!(expression, %base, value, "read integer literal");
        return Ok(value as f64);
    }

    let value = parse(expression, angle)?.evaluate()?;
    if !value.is_finite() {
        return Err(CalcError::expression(format!("{} evaluates to {}", expression.trim(), value)));
    }
    debug!(expression, %angle, value, "evaluated expression");
    Ok(value)
}
