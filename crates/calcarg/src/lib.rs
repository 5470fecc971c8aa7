//! # calcarg
//!
//! Parse small arithmetic formulas once, evaluate them many times.
//!
//! Formulas combine numeric literals, variables written between escape
//! markers (`<name>`), `+ - * /`, unary minus and parentheses. A parsed
//! [`Calculator`] is evaluated against any [`Bindings`] map from variable
//! name to `f32`.
//!
//! ## Features
//!
//! - Fail-fast parsing with errors naming the offending token and offset
//! - Division by zero evaluates to `0`
//! - `json`: evaluate against a JSON object of bindings (default)
//! - `serde`: serialize parsed trees and parse options
//!
//! ## Example
//!
//! ```rust
//! use calcarg::prelude::*;
//! use std::collections::HashMap;
//!
//! let calculator = Calculator::parse("(100-<age>)*<health>/100").unwrap();
//! let bindings = HashMap::from([("age", 21.0), ("health", 60.0)]);
//! let score = calculator.evaluate(&bindings).unwrap();
//! assert!((score - 47.4).abs() < 1e-4);
//! ```

pub mod calculator;
pub mod error;
pub mod prelude;

pub use calculator::Calculator;
pub use error::{EvalError, FormulaError, LexError, ParseError, Result};

// Re-export formula types
pub use calcarg_formula::{
    evaluate, parse_formula, parse_formula_with_options, BinaryOperator, Bindings, EvalResult,
    Expr, Lexer, ParseOptions, ParseResult, Token, TokenKind, UnaryOperator,
};

/// Parse a formula into a [`Calculator`] with default options
pub fn parse(formula: impl Into<String>) -> ParseResult<Calculator> {
    Calculator::parse(formula)
}
