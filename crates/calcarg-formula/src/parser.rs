//! Formula parser
//!
//! A Pratt (precedence climbing) parser. Each token kind that can start an
//! expression has a prefix rule; `+ - * /` have infix rules. The right-hand
//! side of an infix operator is parsed at the operator's own precedence, so
//! chains of equal precedence fold to the left: `a-b-c` is `(a-b)-c`.
//!
//! Parsing is fail-fast: the first lexical or syntactic fault is returned.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{ParseError, ParseResult};
use crate::lexer::Lexer;
use crate::options::ParseOptions;
use crate::token::{Token, TokenKind};

/// Parse a formula string into an AST using default options
///
/// # Example
/// ```rust
/// use calcarg_formula::parse_formula;
///
/// let ast = parse_formula("(100-<age>)*<health>/100").unwrap();
/// assert_eq!(ast.to_string(), "(((100 - age) * health) / 100)");
/// ```
pub fn parse_formula(formula: &str) -> ParseResult<Expr> {
    parse_formula_with_options(formula, &ParseOptions::default())
}

/// Parse a formula string into an AST
pub fn parse_formula_with_options(formula: &str, options: &ParseOptions) -> ParseResult<Expr> {
    let result = Parser::new(formula, options.clone()).and_then(Parser::parse);
    if let Err(e) = &result {
        tracing::debug!(formula, error = %e, "formula rejected");
    }
    result
}

/// Binding strength of the token that follows an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `+`, `-`
    Sum,
    /// `*`, `/`
    Product,
    /// `-X`
    Prefix,
    /// `(X)`, `<X>`
    Call,
}

impl Precedence {
    /// Precedence table; kinds with no entry rank [`Precedence::Lowest`]
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LeftParen | TokenKind::LeftEscape => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

/// Infix rule table
fn infix_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Asterisk => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        _ => None,
    }
}

/// A parsed subtree and its height in nodes
struct Subtree {
    expr: Expr,
    height: usize,
}

/// Formula parser over a pull-based token stream
///
/// `current` is the token under the cursor, `peek` the one after it.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
    peek: Token<'a>,
    options: ParseOptions,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: ParseOptions) -> ParseResult<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            peek,
            options,
            nesting: 0,
        })
    }

    /// Parse one expression at the lowest precedence
    pub fn parse(mut self) -> ParseResult<Expr> {
        let tree = self.parse_expression(Precedence::Lowest)?;

        if !self.options.allow_trailing_input && !self.peek.is(TokenKind::Eof) {
            return Err(ParseError::TrailingInput {
                found: self.peek.describe(),
                offset: self.peek.offset,
            });
        }

        Ok(tree.expr)
    }

    // === Token cursor ===

    fn advance(&mut self) -> ParseResult<()> {
        self.current = self.peek;
        self.peek = self.lexer.next_token()?;
        Ok(())
    }

    fn expect_peek(
        &mut self,
        kind: TokenKind,
        missing: fn(String, usize) -> ParseError,
    ) -> ParseResult<()> {
        if self.peek.is(kind) {
            self.advance()
        } else {
            Err(missing(self.peek.describe(), self.peek.offset))
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    // === Expression parsing ===

    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Subtree> {
        if self.nesting >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_depth,
            });
        }

        // Balanced on every exit, including errors
        self.nesting += 1;
        let result = self.parse_expression_inner(precedence);
        self.nesting -= 1;
        result
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> ParseResult<Subtree> {
        let mut left = self.parse_prefix()?;

        while precedence < self.peek_precedence() {
            let Some(op) = infix_operator(self.peek.kind) else {
                break;
            };
            self.advance()?;
            left = self.parse_infix(left, op)?;
        }

        Ok(left)
    }

    /// Dispatch on the prefix rule of the current token
    fn parse_prefix(&mut self) -> ParseResult<Subtree> {
        match self.current.kind {
            TokenKind::Digit => self.parse_number(),
            TokenKind::Letter => Ok(Subtree {
                expr: Expr::variable(self.current.literal),
                height: 1,
            }),
            TokenKind::Minus => self.parse_negation(),
            TokenKind::LeftParen => self.parse_grouped(),
            TokenKind::LeftEscape => self.parse_escaped(),
            _ => Err(ParseError::UnexpectedToken {
                found: self.current.describe(),
                offset: self.current.offset,
            }),
        }
    }

    fn parse_number(&mut self) -> ParseResult<Subtree> {
        let literal = self.current.literal;
        let invalid = || ParseError::InvalidLiteral {
            literal: literal.to_string(),
            offset: self.current.offset,
        };

        let value: f32 = literal.parse().map_err(|_| invalid())?;
        // Out of single-precision range
        if !value.is_finite() {
            return Err(invalid());
        }

        Ok(Subtree {
            expr: Expr::Number(value),
            height: 1,
        })
    }

    fn parse_negation(&mut self) -> ParseResult<Subtree> {
        self.advance()?;
        let operand = self.parse_expression(Precedence::Prefix)?;
        self.node(
            Expr::unary(UnaryOperator::Negate, operand.expr),
            operand.height + 1,
        )
    }

    fn parse_grouped(&mut self) -> ParseResult<Subtree> {
        self.advance()?;
        let inner = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen, |found, offset| {
            ParseError::MissingClosingParen { found, offset }
        })?;
        Ok(inner)
    }

    /// `<name>`; any sub-expression is accepted between the markers
    fn parse_escaped(&mut self) -> ParseResult<Subtree> {
        self.advance()?;
        let inner = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightEscape, |found, offset| {
            ParseError::MissingClosingEscape { found, offset }
        })?;
        Ok(inner)
    }

    fn parse_infix(&mut self, left: Subtree, op: BinaryOperator) -> ParseResult<Subtree> {
        let precedence = self.current_precedence();
        self.advance()?;
        let right = self.parse_expression(precedence)?;

        let height = left.height.max(right.height) + 1;
        self.node(Expr::binary(op, left.expr, right.expr), height)
    }

    fn node(&self, expr: Expr, height: usize) -> ParseResult<Subtree> {
        if height > self.options.max_height {
            return Err(ParseError::NestingTooDeep {
                limit: self.options.max_height,
            });
        }
        Ok(Subtree { expr, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;
    use pretty_assertions::assert_eq;

    fn num(n: f32) -> Expr {
        Expr::Number(n)
    }

    fn var(name: &str) -> Expr {
        Expr::variable(name)
    }

    fn neg(operand: Expr) -> Expr {
        Expr::unary(UnaryOperator::Negate, operand)
    }

    fn bin(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::binary(op, left, right)
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_formula("42").unwrap(), num(42.0));
        assert_eq!(parse_formula("3.25").unwrap(), num(3.25));
        assert_eq!(parse_formula("1.").unwrap(), num(1.0));
    }

    #[test]
    fn test_parse_variables() {
        assert_eq!(parse_formula("<age>").unwrap(), var("age"));
        assert_eq!(parse_formula("  < age >  ").unwrap(), var("age"));
        // Bare identifiers are accepted outside escape markers too
        assert_eq!(parse_formula("age").unwrap(), var("age"));
    }

    #[test]
    fn test_parse_precedence() {
        use BinaryOperator::*;

        assert_eq!(
            parse_formula("1+2*3").unwrap(),
            bin(num(1.0), Add, bin(num(2.0), Multiply, num(3.0)))
        );
        assert_eq!(
            parse_formula("(1+2)*3").unwrap(),
            bin(bin(num(1.0), Add, num(2.0)), Multiply, num(3.0))
        );
        assert_eq!(
            parse_formula("(100-<age>)*<health>/100").unwrap(),
            bin(
                bin(bin(num(100.0), Subtract, var("age")), Multiply, var("health")),
                Divide,
                num(100.0)
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        use BinaryOperator::*;

        assert_eq!(
            parse_formula("a-b-c").unwrap(),
            bin(bin(var("a"), Subtract, var("b")), Subtract, var("c"))
        );
        assert_eq!(
            parse_formula("8/4/2").unwrap(),
            bin(bin(num(8.0), Divide, num(4.0)), Divide, num(2.0))
        );
    }

    #[test]
    fn test_parse_unary() {
        use BinaryOperator::*;

        // Negation binds tighter than multiplication
        assert_eq!(
            parse_formula("-a*b").unwrap(),
            bin(neg(var("a")), Multiply, var("b"))
        );
        assert_eq!(parse_formula("--3").unwrap(), neg(neg(num(3.0))));
        assert_eq!(
            parse_formula("2*-3").unwrap(),
            bin(num(2.0), Multiply, neg(num(3.0)))
        );
        assert_eq!(
            parse_formula("-(1+2)").unwrap(),
            neg(bin(num(1.0), Add, num(2.0)))
        );
    }

    #[test]
    fn test_escape_accepts_sub_expressions() {
        assert_eq!(
            parse_formula("<a+1>").unwrap(),
            bin(var("a"), BinaryOperator::Add, num(1.0))
        );
    }

    #[test]
    fn test_missing_closing_paren() {
        assert_eq!(
            parse_formula("(1+2"),
            Err(ParseError::MissingClosingParen {
                found: "end of input".into(),
                offset: 4,
            })
        );
        assert_eq!(
            parse_formula("(1+2>"),
            Err(ParseError::MissingClosingParen {
                found: ">".into(),
                offset: 4,
            })
        );
    }

    #[test]
    fn test_missing_closing_escape() {
        assert_eq!(
            parse_formula("<age)"),
            Err(ParseError::MissingClosingEscape {
                found: ")".into(),
                offset: 4,
            })
        );
    }

    #[test]
    fn test_unexpected_token() {
        assert_eq!(
            parse_formula(""),
            Err(ParseError::UnexpectedToken {
                found: "end of input".into(),
                offset: 0,
            })
        );
        assert_eq!(
            parse_formula("*2"),
            Err(ParseError::UnexpectedToken {
                found: "*".into(),
                offset: 0,
            })
        );
        assert_eq!(
            parse_formula("1+"),
            Err(ParseError::UnexpectedToken {
                found: "end of input".into(),
                offset: 2,
            })
        );
        assert!(matches!(
            parse_formula("()"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_lex_errors_surface() {
        assert_eq!(
            parse_formula("1.2.3"),
            Err(ParseError::Lex(LexError::MalformedNumber {
                literal: "1.2.3".into(),
                offset: 0,
            }))
        );
        assert_eq!(
            parse_formula("<a> % 2"),
            Err(ParseError::Lex(LexError::UnrecognizedCharacter {
                ch: '%',
                offset: 4,
            }))
        );
    }

    #[test]
    fn test_literal_out_of_range() {
        let huge = format!("1{}", "0".repeat(40));
        assert_eq!(
            parse_formula(&huge),
            Err(ParseError::InvalidLiteral {
                literal: huge.clone(),
                offset: 0,
            })
        );
    }

    #[test]
    fn test_trailing_input() {
        assert_eq!(
            parse_formula("1 2"),
            Err(ParseError::TrailingInput {
                found: "2".into(),
                offset: 2,
            })
        );
        assert!(matches!(
            parse_formula("(1))"),
            Err(ParseError::TrailingInput { .. })
        ));
        // `(` has call precedence but no infix rule
        assert!(matches!(
            parse_formula("2(3)"),
            Err(ParseError::TrailingInput { .. })
        ));

        let lenient = ParseOptions::lenient();
        assert_eq!(parse_formula_with_options("1 2", &lenient).unwrap(), num(1.0));
        assert_eq!(
            parse_formula_with_options("<a>)", &lenient).unwrap(),
            var("a")
        );
    }

    #[test]
    fn test_nesting_limit() {
        let options = ParseOptions {
            max_depth: 3,
            max_height: 3,
            ..ParseOptions::default()
        };
        assert!(parse_formula_with_options("((1))", &options).is_ok());
        assert_eq!(
            parse_formula_with_options("(((1)))", &options),
            Err(ParseError::NestingTooDeep { limit: 3 })
        );
        // Left-deep chains are bounded by tree height, not recursion
        assert!(parse_formula_with_options("1+1+1", &options).is_ok());
        assert_eq!(
            parse_formula_with_options("1+1+1+1", &options),
            Err(ParseError::NestingTooDeep { limit: 3 })
        );
    }

    #[test]
    fn test_nesting_balanced_after_error() {
        let mut parser = Parser::new("((1+)", ParseOptions::default()).unwrap();
        assert!(parser.parse_expression(Precedence::Lowest).is_err());
        assert_eq!(parser.nesting, 0);
    }

    #[test]
    fn test_long_sum_of_variables() {
        let formula = (0..300)
            .map(|i| format!("<v{}>", i))
            .collect::<Vec<_>>()
            .join("+");
        let ast = parse_formula(&formula).unwrap();
        assert_eq!(ast.variables().len(), 300);

        let bindings: std::collections::HashMap<String, f32> =
            (0..300).map(|i| (format!("v{}", i), 1.0)).collect();
        assert_eq!(crate::evaluate(&ast, &bindings), Ok(300.0));
    }

    #[test]
    fn test_default_nesting_limit() {
        let deep_parens = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse_formula(&deep_parens).unwrap(), num(1.0));

        let long_chain = vec!["1"; 1500].join("*");
        assert!(parse_formula(&long_chain).is_ok());

        let too_long = vec!["1"; 3000].join("+");
        assert_eq!(
            parse_formula(&too_long),
            Err(ParseError::NestingTooDeep {
                limit: ParseOptions::DEFAULT_MAX_HEIGHT,
            })
        );

        let negations = format!("{}1", "-".repeat(300));
        assert_eq!(
            parse_formula(&negations),
            Err(ParseError::NestingTooDeep {
                limit: ParseOptions::DEFAULT_MAX_DEPTH,
            })
        );
    }

    #[test]
    fn test_precedence_table() {
        assert!(Precedence::of(TokenKind::Plus) < Precedence::of(TokenKind::Asterisk));
        assert!(Precedence::of(TokenKind::Slash) < Precedence::Prefix);
        assert!(Precedence::Prefix < Precedence::of(TokenKind::LeftEscape));
        assert_eq!(Precedence::of(TokenKind::RightParen), Precedence::Lowest);
    }
}
