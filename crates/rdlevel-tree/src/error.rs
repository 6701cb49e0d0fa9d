//! Parse error kinds.

use rdlevel_tokenizer::Span;

/// Parse error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Character that cannot start any token.
    UnexpectedCharacter,
    /// String literal missing its closing quote.
    UnterminatedString {
        /// Span of the opening quote.
        opened: Span,
    },
    /// Block comment missing its closing `*/`.
    UnterminatedComment {
        /// Span of the opening `/*`.
        opened: Span,
    },
    /// Invalid escape sequence in a string literal.
    InvalidEscape(String),
    /// Malformed or out-of-range number.
    InvalidNumber,
    /// Expected a value.
    ExpectedValue,
    /// Expected an object key.
    ExpectedKey,
    /// Expected `:` after an object key.
    ExpectedColon,
    /// Expected `,` or the closing delimiter.
    ExpectedCommaOrClose {
        /// The closing delimiter that would have been accepted.
        close: char,
    },
    /// Input ended inside an object.
    UnclosedObject {
        /// Span of the opening brace.
        opened: Span,
    },
    /// Input ended inside a sequence.
    UnclosedSequence {
        /// Span of the opening bracket.
        opened: Span,
    },
    /// Input ended where a value was required.
    UnexpectedEof,
    /// Content after the root value.
    TrailingContent,
    /// Objects and sequences nested deeper than the configured limit.
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
    /// Root value is not an object.
    ExpectedObjectRoot,
    /// Compact event string with an unbalanced quote.
    MalformedEvent,
    /// Compact event whose tag is not in the event schema.
    UnknownEventType {
        /// The tag as written.
        name: String,
    },
    /// Compact event with the wrong number of positional fields.
    FieldCountMismatch {
        /// The event tag.
        event: String,
        /// Field count from the schema.
        expected: usize,
        /// Field count in the source.
        found: usize,
    },
}

/// The three classes every parse error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed text.
    Syntax,
    /// Compact event tag missing from the schema.
    UnknownEventType,
    /// Compact event with the wrong positional field count.
    FieldCountMismatch,
}

impl ParseErrorKind {
    /// Which class of error this is.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseErrorKind::UnknownEventType { .. } => ErrorCategory::UnknownEventType,
            ParseErrorKind::FieldCountMismatch { .. } => ErrorCategory::FieldCountMismatch,
            _ => ErrorCategory::Syntax,
        }
    }

    /// Short human-readable message.
    pub fn message(&self) -> String {
        match self {
            ParseErrorKind::UnexpectedCharacter => "unexpected character".to_string(),
            ParseErrorKind::UnterminatedString { .. } => "unterminated string".to_string(),
            ParseErrorKind::UnterminatedComment { .. } => "unterminated block comment".to_string(),
            ParseErrorKind::InvalidEscape(seq) => format!("invalid escape sequence '{seq}'"),
            ParseErrorKind::InvalidNumber => "invalid number".to_string(),
            ParseErrorKind::ExpectedValue => "expected value".to_string(),
            ParseErrorKind::ExpectedKey => "expected key".to_string(),
            ParseErrorKind::ExpectedColon => "expected ':' after key".to_string(),
            ParseErrorKind::ExpectedCommaOrClose { close } => {
                format!("expected ',' or '{close}'")
            }
            ParseErrorKind::UnclosedObject { .. } => "unclosed object".to_string(),
            ParseErrorKind::UnclosedSequence { .. } => "unclosed sequence".to_string(),
            ParseErrorKind::UnexpectedEof => "unexpected end of input".to_string(),
            ParseErrorKind::TrailingContent => "trailing content after root value".to_string(),
            ParseErrorKind::NestingTooDeep { limit } => {
                format!("nesting deeper than {limit} levels")
            }
            ParseErrorKind::ExpectedObjectRoot => "expected an object at the root".to_string(),
            ParseErrorKind::MalformedEvent => "malformed event string".to_string(),
            ParseErrorKind::UnknownEventType { name } => format!("unknown event type `{name}`"),
            ParseErrorKind::FieldCountMismatch {
                event,
                expected,
                found,
            } => format!("event `{event}` takes {expected} fields, found {found}"),
        }
    }
}
