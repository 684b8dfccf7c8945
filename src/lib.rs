//! # calcpad
//!
//! `calcpad` is a Rust library for a desk calculator with **scientific**,
//! **programmer** and **helper-tool** modes.
//!
//! ## Overview
//! - Evaluate calculator expressions with operators, trigonometric functions and constants.
//! - Switch between degrees and radians, and between binary, octal, decimal and hexadecimal.
//! - Convert units, solve equations and compute geometry, finance and statistics results.
//! - Drive a full calculator session (buffer, memory, history) one action at a time.
//!
//! Internally, expressions are first tokenized into lexemes,
//! then converted to an AST using the Shunting-Yard algorithm,
//! and finally evaluated directly from the tree.
//!
//! ## Feature Highlights
//! - **Explicit modes**: [`NumeralBase`] and [`AngleMode`] are parameters, never globals
//! - **Operator precedence** with `^` binding tighter than a unary sign (`-2^2 == -4`)
//! - **Typed errors** through [`CalcError`]
//! - **Bounded history** exportable as JSON
//!
//! ## Example
//! ```rust
//! use calcpad::{evaluate, AngleMode, NumeralBase};
//!
//! let value = evaluate("sin(30) * 4", NumeralBase::Decimal, AngleMode::Degrees).unwrap();
//! assert!((value - 2.0).abs() < 1.0e-12);
//! ```
//!
//! ## Example: Retrieving All Names
//! ```rust
//! use calcpad::parser::{constant, UnaryOperatorKind, BinaryOperatorKind, FunctionKind};
//!
//! // Constants
//! let constant_names: Vec<&'static str> = constant::names();
//! println!("Constants: {:?}", constant_names);
//!
//! // Unary operators
//! let unary_names: Vec<&'static str> = UnaryOperatorKind::names();
//! println!("Unary Operators: {:?}", unary_names);
//!
//! // Binary operators
//! let binary_names: Vec<&'static str> = BinaryOperatorKind::names();
//! println!("Binary Operators: {:?}", binary_names);
//!
//! // Functions
//! let function_names: Vec<&'static str> = FunctionKind::names();
//! println!("Functions: {:?}", function_names);
//! ```
//!
//! ## Example: A Session
//! ```rust
//! use calcpad::{NumeralBase, SessionBuilder};
//!
//! let mut session = SessionBuilder::new().build();
//! session.set_expression("200 + 55");
//! session.evaluate().unwrap();
//! session.set_base(NumeralBase::Hexadecimal).unwrap();
//! assert_eq!(session.result_display(), "FF");
//! ```
//!
//! ## License
//! Licensed under either **MIT** or **Apache-2.0** at your option.

#[macro_use]
pub mod mode;

pub mod base;
pub mod builder;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod formulas;
pub mod history;
mod lexer;
pub mod memory;
pub mod parser;
pub mod session;
pub mod solver;
pub mod units;

pub use crate::builder::{SessionBuilder, SessionConfig};
pub use crate::error::{CalcError, CalcResult};
pub use crate::evaluator::evaluate;
pub use crate::format::{format_in_base, format_number};
pub use crate::history::{History, HistoryEntry};
pub use crate::mode::{AngleMode, NumeralBase};
pub use crate::parser::FunctionKind;
pub use crate::session::Session;
