//! Token types for the rdlevel tokenizer.

use crate::Span;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural tokens
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,

    // Literal tokens
    /// Quoted string, quotes and escapes included: `"hello\n"`
    String,
    /// Number in JSON syntax: `-12`, `0.5`, `1e-3`
    Number,
    /// Bare identifier: `song`, `true`, `null`, `_row2`
    Ident,

    // Comment tokens
    /// Line comment: `// ...`
    LineComment,
    /// Block comment: `/* ... */`
    BlockComment,

    // Whitespace tokens
    /// Horizontal whitespace: spaces, tabs, carriage returns
    Whitespace,
    /// Newline: `\n`
    Newline,

    // Special tokens
    /// End of file
    Eof,
    /// Lexer error (unterminated string or comment, malformed number,
    /// unrecognized character)
    Error,
}

impl TokenKind {
    /// Whether this token is trivia (whitespace or comments).
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }
}

/// A token with its kind, span, and source text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source text.
    pub span: Span,
    /// The source text of this token.
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: &'src str) -> Self {
        Self { kind, span, text }
    }
}
