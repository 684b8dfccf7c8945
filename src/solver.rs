//! # solver.rs
//!
//! Closed-form solvers for linear, quadratic and 2x2 linear systems.
//!
//! Solutions render with four decimals:
//! ```rust
//! use calcpad::solver::solve_quadratic;
//!
//! let roots = solve_quadratic(1.0, -3.0, 2.0).unwrap();
//! assert_eq!(roots.to_string(), "Two roots: x1 = 2.0000, x2 = 1.0000");
//! ```

use crate::error::{CalcError, CalcResult};

/// Rejects NaN and infinite coefficients.
fn check_finite(coefficients: &[(&str, f64)]) -> CalcResult<()> {
    match coefficients.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(CalcError::input(*name, "not a finite number")),
        None => Ok(()),
    }
}

/// Solution of `ax + b = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSolution {
    pub x: f64,
}

impl std::fmt::Display for LinearSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution: x = {:.4}", self.x)
    }
}

/// Real roots of `ax² + bx + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// Negative discriminant.
    None,
    /// Zero discriminant.
    One(f64),
    /// Positive discriminant; `(-b + √D) / 2a` first.
    Two(f64, f64),
}

impl std::fmt::Display for QuadraticRoots {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "No real roots (discriminant < 0)"),
            Self::One(x) => write!(f, "One root: x = {:.4}", x),
            Self::Two(x1, x2) => write!(f, "Two roots: x1 = {:.4}, x2 = {:.4}", x1, x2),
        }
    }
}

/// Solution of a 2x2 linear system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimultaneousSolution {
    pub x: f64,
    pub y: f64,
}

impl std::fmt::Display for SimultaneousSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Solution: x = {:.4}, y = {:.4}", self.x, self.y)
    }
}

/// Solves `ax + b = 0`.
///
/// # Errors
/// - [`CalcError::DegenerateEquation`] when `a == 0`.
/// - [`CalcError::InvalidInput`] for a non-finite coefficient.
pub fn solve_linear(a: f64, b: f64) -> CalcResult<LinearSolution> {
    check_finite(&[("a", a), ("b", b)])?;
    if a == 0.0 {
        return Err(CalcError::DegenerateEquation { coefficient: "a" });
    }
    Ok(LinearSolution { x: -b / a })
}

/// Solves `ax² + bx + c = 0` over the reals.
///
/// A negative discriminant is not an error; it yields [`QuadraticRoots::None`].
///
/// # Errors
/// - [`CalcError::DegenerateEquation`] when `a == 0`.
/// - [`CalcError::InvalidInput`] for a non-finite coefficient.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> CalcResult<QuadraticRoots> {
    check_finite(&[("a", a), ("b", b), ("c", c)])?;
    if a == 0.0 {
        return Err(CalcError::DegenerateEquation { coefficient: "a" });
    }

    let discriminant = b * b - 4.0 * a * c;
    let roots = if discriminant < 0.0 {
        QuadraticRoots::None
    } else if discriminant == 0.0 {
        QuadraticRoots::One(-b / (2.0 * a))
    } else {
        let root = discriminant.sqrt();
        QuadraticRoots::Two((-b + root) / (2.0 * a), (-b - root) / (2.0 * a))
    };
    Ok(roots)
}

/// Solves `a1·x + b1·y = c1`, `a2·x + b2·y = c2` by Cramer's rule.
///
/// # Errors
/// - [`CalcError::NoUniqueSolution`] when the determinant is zero.
/// - [`CalcError::InvalidInput`] for a non-finite coefficient.
pub fn solve_simultaneous(
    a1: f64,
    b1: f64,
    c1: f64,
    a2: f64,
    b2: f64,
    c2: f64,
) -> CalcResult<SimultaneousSolution> {
    check_finite(&[("a1", a1), ("b1", b1), ("c1", c1), ("a2", a2), ("b2", b2), ("c2", c2)])?;

    let det = a1 * b2 - a2 * b1;
    if det == 0.0 {
        return Err(CalcError::NoUniqueSolution);
    }
    Ok(SimultaneousSolution {
        x: (c1 * b2 - c2 * b1) / det,
        y: (a1 * c2 - a2 * c1) / det,
    })
}
