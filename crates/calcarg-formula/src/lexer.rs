//! Formula lexer
//!
//! Pull-based: every call to [`Lexer::next_token`] scans exactly one token
//! from a byte cursor and never looks back at consumed input.

use crate::error::{LexError, LexResult};
use crate::token::{Token, TokenKind};

/// Splits a formula into [`Token`]s on demand
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    /// Scan the next token.
    ///
    /// Once the input is exhausted every further call returns an
    /// [`TokenKind::Eof`] token at the end offset.
    pub fn next_token(&mut self) -> LexResult<Token<'a>> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(byte) = self.peek_byte() else {
            return Ok(Token::new(TokenKind::Eof, "", start));
        };

        let token = if let Some(kind) = TokenKind::from_symbol(byte) {
            self.pos += 1;
            Token::new(kind, &self.input[start..self.pos], start)
        } else if byte.is_ascii_digit() {
            self.scan_number()?
        } else if is_letter(byte) {
            self.scan_word()
        } else {
            // Report the whole character, not just its first byte
            let ch = self.input[start..].chars().next().unwrap_or('\0');
            return Err(LexError::UnrecognizedCharacter { ch, offset: start });
        };

        tracing::trace!(token = %token, offset = token.offset, "lexed token");
        Ok(token)
    }

    fn scan_number(&mut self) -> LexResult<Token<'a>> {
        let start = self.pos;
        let mut seen_dot = false;
        let mut malformed = false;

        while let Some(byte) = self.peek_byte() {
            if byte == b'.' {
                malformed |= seen_dot;
                seen_dot = true;
            } else if !byte.is_ascii_digit() {
                break;
            }
            self.pos += 1;
        }

        let literal = &self.input[start..self.pos];
        if malformed {
            return Err(LexError::MalformedNumber {
                literal: literal.to_string(),
                offset: start,
            });
        }
        Ok(Token::new(TokenKind::Digit, literal, start))
    }

    fn scan_word(&mut self) -> Token<'a> {
        let start = self.pos;
        while self
            .peek_byte()
            .map_or(false, |b| is_letter(b) || b.is_ascii_digit())
        {
            self.pos += 1;
        }
        Token::new(TokenKind::Letter, &self.input[start..self.pos], start)
    }

    // === Helper methods ===

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_byte(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    /// Yields tokens up to (not including) end of input, or the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is(TokenKind::Eof) => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn is_letter(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}
