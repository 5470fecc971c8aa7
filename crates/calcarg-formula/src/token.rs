//! Token types produced by the lexer

use std::fmt;

/// Kind tag of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input; repeats once reached
    Eof,
    /// Digits with at most one decimal point
    Digit,
    /// Letters, digits and underscores, not starting with a digit
    Letter,

    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,

    // Delimiters
    LeftParen,
    RightParen,
    /// Opening escape marker `<`
    LeftEscape,
    /// Closing escape marker `>`
    RightEscape,
}

impl TokenKind {
    /// Kind for a single-character symbol, if the byte is one
    pub fn from_symbol(byte: u8) -> Option<Self> {
        let kind = match byte {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'<' => TokenKind::LeftEscape,
            b'>' => TokenKind::RightEscape,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Digit => "DIGIT",
            TokenKind::Letter => "LETTER",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftEscape => "<",
            TokenKind::RightEscape => ">",
        };
        f.write_str(name)
    }
}

/// A lexed token borrowing its text from the formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Source text of the token (empty for [`TokenKind::Eof`])
    pub literal: &'a str,
    /// Byte offset of the token in the formula
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, literal: &'a str, offset: usize) -> Self {
        Self {
            kind,
            literal,
            offset,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Text used for this token in error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => self.literal.to_string(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Digit | TokenKind::Letter => write!(f, "{}({})", self.kind, self.literal),
            kind => write!(f, "{}", kind),
        }
    }
}
