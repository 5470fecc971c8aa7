//! Parse-once, evaluate-many formula calculator
//!
//! # Example
//!
//! ```rust
//! use calcarg::Calculator;
//! use std::collections::HashMap;
//!
//! let calculator = Calculator::parse("(100-<age>)*<health>/100").unwrap();
//!
//! for (age, health) in [(21.0, 60.0), (40.0, 100.0)] {
//!     let bindings = HashMap::from([("age", age), ("health", health)]);
//!     let score = calculator.evaluate(&bindings).unwrap();
//!     assert!(score > 0.0);
//! }
//! ```

use crate::error::{EvalError, ParseError};
use calcarg_formula::{
    evaluate, parse_formula_with_options, Bindings, EvalResult, Expr, ParseOptions, ParseResult,
};
use std::fmt;
use std::str::FromStr;

/// A parsed formula
///
/// Immutable once built. Evaluation only reads the tree, so one
/// `Calculator` can be shared across threads, each evaluation supplying its
/// own bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    formula: String,
    root: Expr,
}

impl Calculator {
    /// Parse a formula with default options
    pub fn parse(formula: impl Into<String>) -> ParseResult<Self> {
        Self::parse_with_options(formula, &ParseOptions::default())
    }

    /// Parse a formula with custom options
    pub fn parse_with_options(
        formula: impl Into<String>,
        options: &ParseOptions,
    ) -> ParseResult<Self> {
        let formula = formula.into();
        let root = parse_formula_with_options(&formula, options)?;
        tracing::debug!(
            formula = formula.as_str(),
            variables = root.variables().len(),
            "formula parsed"
        );
        Ok(Self { formula, root })
    }

    /// Evaluate the formula against `bindings`
    pub fn evaluate<B: Bindings + ?Sized>(&self, bindings: &B) -> EvalResult<f32> {
        let result = evaluate(&self.root, bindings);
        tracing::trace!(formula = self.formula.as_str(), ?result, "formula evaluated");
        result
    }

    /// Evaluate against a JSON object such as `{"age":21,"health":60}`
    #[cfg(feature = "json")]
    pub fn evaluate_json(&self, json: &str) -> crate::Result<f32> {
        let bindings: std::collections::HashMap<String, f32> = serde_json::from_str(json)
            .map_err(|e| crate::FormulaError::Bindings(e.to_string()))?;
        Ok(self.evaluate(&bindings)?)
    }

    /// The original formula text
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Root of the parsed expression tree
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Distinct variable names, in order of first appearance
    pub fn variables(&self) -> Vec<&str> {
        self.root.variables()
    }

    /// Variables the formula references that `bindings` does not define
    pub fn missing_variables<B: Bindings + ?Sized>(&self, bindings: &B) -> Vec<&str> {
        self.variables()
            .into_iter()
            .filter(|name| bindings.get_value(name).is_none())
            .collect()
    }

    /// Check up front that every referenced variable is bound
    pub fn check_bindings<B: Bindings + ?Sized>(&self, bindings: &B) -> EvalResult<()> {
        match self.missing_variables(bindings).first() {
            Some(name) => Err(EvalError::MissingVariable(name.to_string())),
            None => Ok(()),
        }
    }
}

impl FromStr for Calculator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula)
    }
}
