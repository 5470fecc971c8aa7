//! # calcarg-formula
//!
//! Formula lexer, parser and evaluator for calcarg.
//!
//! This crate provides:
//! - Tokenization (text → tokens)
//! - Pratt parsing (tokens → AST)
//! - Evaluation against variable bindings (AST → `f32`)
//!
//! ## Example
//!
//! ```rust
//! use calcarg_formula::{evaluate, parse_formula};
//! use std::collections::HashMap;
//!
//! let ast = parse_formula("(100-<age>)*<health>/100").unwrap();
//! let bindings = HashMap::from([("age", 21.0), ("health", 60.0)]);
//! let result = evaluate(&ast, &bindings).unwrap();
//! assert!((result - 47.4).abs() < 1e-4);
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod token;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{EvalError, EvalResult, LexError, LexResult, ParseError, ParseResult};
pub use evaluator::{evaluate, Bindings};
pub use lexer::Lexer;
pub use options::ParseOptions;
pub use parser::{parse_formula, parse_formula_with_options, Parser, Precedence};
pub use token::{Token, TokenKind};
