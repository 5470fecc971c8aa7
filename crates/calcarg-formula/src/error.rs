//! Formula error types

use thiserror::Error;

/// Result type for lexing
pub type LexResult<T> = std::result::Result<T, LexError>;

/// Result type for parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type for evaluation
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Errors raised while splitting formula text into tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A digit run containing a second decimal point
    #[error("Malformed numeric literal '{literal}' at offset {offset}")]
    MalformedNumber { literal: String, offset: usize },

    /// A character outside the formula alphabet
    #[error("Unrecognized character '{ch}' at offset {offset}")]
    UnrecognizedCharacter { ch: char, offset: usize },
}

/// Errors raised while building the expression tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token with no prefix rule where an expression was required
    #[error("Unexpected token '{found}' in expression position at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    /// Literal text that does not fit a single-precision number
    #[error("Cannot parse literal '{literal}' at offset {offset}")]
    InvalidLiteral { literal: String, offset: usize },

    #[error("Expected closing parenthesis, got '{found}' at offset {offset}")]
    MissingClosingParen { found: String, offset: usize },

    #[error("Expected closing escape marker '>', got '{found}' at offset {offset}")]
    MissingClosingEscape { found: String, offset: usize },

    /// Tokens left over after a complete expression
    #[error("Unexpected '{found}' after expression at offset {offset}")]
    TrailingInput { found: String, offset: usize },

    #[error("Expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },
}

/// Errors raised while walking a parsed tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Variable referenced by the formula but absent from the bindings
    #[error("Missing variable '{0}' in bindings")]
    MissingVariable(String),
}

impl EvalError {
    /// Name of the variable that could not be resolved
    pub fn variable(&self) -> &str {
        match self {
            EvalError::MissingVariable(name) => name,
        }
    }
}
