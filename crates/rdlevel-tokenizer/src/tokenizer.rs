//! Tokenizer for rdlevel sources.

use crate::{Span, Token, TokenKind};
use tracing::trace;

/// Byte-order mark written at the start of levels saved by the editor.
const BOM: char = '\u{feff}';

/// A tokenizer that produces tokens from rdlevel source text.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The source text being tokenized.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    ///
    /// A leading byte-order mark is skipped; spans stay relative to `source`.
    pub fn new(source: &'src str) -> Self {
        let mut tokenizer = Self {
            source,
            remaining: source,
            pos: 0,
        };
        if tokenizer.peek() == Some(BOM) {
            tokenizer.advance_by(BOM.len_utf8());
        }
        tokenizer
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Advance by one character and return it.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.advance_by(c.len_utf8());
        Some(c)
    }

    /// Advance by n bytes.
    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.pos += n as u32;
        self.remaining = &self.remaining[n..];
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// Create a token from the given start position to current position.
    fn token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let span = Span::new(start, self.pos);
        let text = &self.source[start as usize..self.pos as usize];
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return self.token(TokenKind::Eof, start);
        };

        match c {
            // Structural tokens
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ':' => self.single(TokenKind::Colon),
            ',' => self.single(TokenKind::Comma),

            '"' => self.tokenize_string(),

            '/' if self.starts_with("//") => self.tokenize_line_comment(),
            '/' if self.starts_with("/*") => self.tokenize_block_comment(),

            '-' | '0'..='9' => self.tokenize_number(),

            ' ' | '\t' | '\r' => self.tokenize_whitespace(),
            '\n' => self.single(TokenKind::Newline),

            _ if is_ident_start(c) => self.tokenize_ident(),

            // Error: unrecognized character
            _ => self.single(TokenKind::Error),
        }
    }

    /// Consume one character as a token of the given kind.
    fn single(&mut self, kind: TokenKind) -> Token<'src> {
        let start = self.pos;
        self.advance();
        self.token(kind, start)
    }

    /// Tokenize horizontal whitespace.
    fn tokenize_whitespace(&mut self) -> Token<'src> {
        let start = self.pos;
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
        self.token(TokenKind::Whitespace, start)
    }

    /// Tokenize a bare identifier.
    fn tokenize_ident(&mut self) -> Token<'src> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        self.token(TokenKind::Ident, start)
    }

    /// Tokenize a quoted string: `"..."`.
    ///
    /// Escapes are skipped over but not validated; raw newlines and tabs are
    /// allowed inside the quotes.
    fn tokenize_string(&mut self) -> Token<'src> {
        let start = self.pos;

        // Consume opening quote
        self.advance();

        loop {
            match self.peek() {
                None => {
                    // Unterminated string
                    return self.token(TokenKind::Error, start);
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    // Escape sequence - consume backslash and next char
                    self.advance();
                    if self.peek().is_some() {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        self.token(TokenKind::String, start)
    }

    /// Tokenize a number following the JSON grammar:
    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
    fn tokenize_number(&mut self) -> Token<'src> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        match self.peek() {
            Some('0') => {
                self.advance();
            }
            Some('1'..='9') => {
                self.eat_digits();
            }
            _ => return self.number_error(start),
        }

        if self.peek() == Some('.') {
            self.advance();
            if !self.eat_digits() {
                return self.number_error(start);
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            if !self.eat_digits() {
                return self.number_error(start);
            }
        }

        self.token(TokenKind::Number, start)
    }

    /// Consume ASCII digits, returning whether any were consumed.
    fn eat_digits(&mut self) -> bool {
        let mut any = false;
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
            any = true;
        }
        any
    }

    /// Swallow the rest of a malformed number so the error covers all of it.
    fn number_error(&mut self, start: u32) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_') {
                self.advance();
            } else {
                break;
            }
        }
        self.token(TokenKind::Error, start)
    }

    /// Tokenize a line comment: `// ...`.
    fn tokenize_line_comment(&mut self) -> Token<'src> {
        let start = self.pos;

        // Consume `//`
        self.advance_by(2);

        // Consume until end of line
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }

        self.token(TokenKind::LineComment, start)
    }

    /// Tokenize a block comment: `/* ... */`. Block comments do not nest.
    fn tokenize_block_comment(&mut self) -> Token<'src> {
        let start = self.pos;

        // Consume `/*`
        self.advance_by(2);

        loop {
            if self.starts_with("*/") {
                self.advance_by(2);
                return self.token(TokenKind::BlockComment, start);
            }
            if self.advance().is_none() {
                // Unterminated comment
                return self.token(TokenKind::Error, start);
            }
        }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

/// Check if a character can start a bare identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if a character can continue a bare identifier.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
