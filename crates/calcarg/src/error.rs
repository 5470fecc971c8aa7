//! Error types for calcarg

use thiserror::Error;

pub use calcarg_formula::{EvalError, LexError, ParseError};

/// Result type alias using [`FormulaError`]
pub type Result<T> = std::result::Result<T, FormulaError>;

/// Any failure while parsing or evaluating a formula
#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// Binding document is not a JSON object of numbers
    #[error("Invalid bindings: {0}")]
    Bindings(String),
}

impl From<LexError> for FormulaError {
    fn from(err: LexError) -> Self {
        FormulaError::Parse(err.into())
    }
}
