//! Parser configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options for formula parsing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Ignore tokens left after the top-level expression instead of
    /// rejecting them (default: false)
    pub allow_trailing_input: bool,
    /// Maximum parser recursion depth: nested parentheses, escape markers
    /// and prefix minus signs (default: 256)
    pub max_depth: usize,
    /// Maximum height of the produced tree, which grows with every infix
    /// operator in a chain like `a+b+c` (default: 2048)
    pub max_height: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_HEIGHT: usize = 2048;

    /// Options that accept trailing tokens after a complete expression
    pub fn lenient() -> Self {
        Self {
            allow_trailing_input: true,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_trailing_input: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_height: Self::DEFAULT_MAX_HEIGHT,
        }
    }
}
