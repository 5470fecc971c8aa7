//! Prelude module - common imports for calcarg users
//!
//! ```rust
//! use calcarg::prelude::*;
//! ```

pub use crate::{
    Bindings, Calculator, EvalError, EvalResult, FormulaError, ParseError, ParseOptions,
    ParseResult, Result,
};
