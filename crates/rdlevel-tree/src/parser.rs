//! Recursive-descent parser for rdlevel sources.
//!
//! One token of lookahead is enough: every decision is made on the next
//! significant token, with trivia (whitespace and comments) skipped by
//! [`TokenSource`].

use std::borrow::Cow;

use rdlevel_tokenizer::{Span, Token, TokenKind, Tokenizer};
use tracing::{debug, trace};

use crate::compact;
use crate::scalar::{parse_number, unquote};
use crate::{Object, ParseError, ParseErrorKind, ParseOptions, Sequence, Value};

/// Wraps the tokenizer and drops trivia.
struct TokenSource<'src> {
    tokenizer: Tokenizer<'src>,
}

impl<'src> TokenSource<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            tokenizer: Tokenizer::new(source),
        }
    }

    /// Next significant token.
    fn next(&mut self) -> Token<'src> {
        loop {
            let token = self.tokenizer.next_token();
            if !token.kind.is_trivia() {
                return token;
            }
        }
    }
}

/// Parser over a single source text.
pub(crate) struct Parser<'src, 'opt> {
    source: &'src str,
    tokens: TokenSource<'src>,
    options: &'opt ParseOptions,
    depth: usize,
}

impl<'src, 'opt> Parser<'src, 'opt> {
    /// Create a new parser for the given source.
    pub(crate) fn new(source: &'src str, options: &'opt ParseOptions) -> Self {
        Self {
            source,
            tokens: TokenSource::new(source),
            options,
            depth: 0,
        }
    }

    /// Parse a single root value of any kind.
    pub(crate) fn parse(mut self) -> Result<Value, ParseError> {
        debug!(len = self.source.len(), "parsing rdlevel source");
        let token = self.tokens.next();
        let value = self.parse_value(token, None)?;
        self.finish()?;
        Ok(value)
    }

    /// Parse a document, whose root must be an object.
    pub(crate) fn parse_document(mut self) -> Result<Object, ParseError> {
        debug!(len = self.source.len(), "parsing rdlevel document");
        let token = self.tokens.next();
        let root = match token.kind {
            TokenKind::LBrace => self.parse_object(token.span)?,
            TokenKind::Eof => return Err(self.error(ParseErrorKind::UnexpectedEof, token.span)),
            TokenKind::Error => return Err(self.lex_error(&token)),
            _ => return Err(self.error(ParseErrorKind::ExpectedObjectRoot, token.span)),
        };
        self.finish()?;
        Ok(root)
    }

    /// Only trivia may follow the root value.
    fn finish(&mut self) -> Result<(), ParseError> {
        let token = self.tokens.next();
        match token.kind {
            TokenKind::Eof => Ok(()),
            TokenKind::Error => Err(self.lex_error(&token)),
            _ => Err(self.error(ParseErrorKind::TrailingContent, token.span)),
        }
    }

    fn error(&self, kind: ParseErrorKind, span: Span) -> ParseError {
        ParseError::new(kind, span, self.source)
    }

    /// Turn a tokenizer error token into a parse error.
    ///
    /// Unterminated strings and comments are reported where the input ends,
    /// with the opening delimiter kept for the diagnostic.
    fn lex_error(&self, token: &Token<'src>) -> ParseError {
        let start = token.span.start;
        let end = Span::empty(token.span.end);
        if token.text.starts_with('"') {
            let opened = Span::new(start, start + 1);
            self.error(ParseErrorKind::UnterminatedString { opened }, end)
        } else if token.text.starts_with("/*") {
            let opened = Span::new(start, start + 2);
            self.error(ParseErrorKind::UnterminatedComment { opened }, end)
        } else if token.text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            self.error(ParseErrorKind::InvalidNumber, token.span)
        } else {
            self.error(ParseErrorKind::UnexpectedCharacter, token.span)
        }
    }

    /// Parse the value starting at `token`. `key` is the object key the
    /// value belongs to, if any; it decides whether a sequence is an event
    /// list.
    fn parse_value(&mut self, token: Token<'src>, key: Option<&str>) -> Result<Value, ParseError> {
        match token.kind {
            TokenKind::LBrace => self.parse_object(token.span).map(Value::Object),
            TokenKind::LBracket => {
                let is_event_list = key.is_some_and(|k| self.options.is_event_list_key(k));
                self.parse_sequence(token.span, is_event_list)
                    .map(Value::Sequence)
            }
            TokenKind::String => self.string(&token).map(Value::String),
            TokenKind::Number => parse_number(token.text)
                .map(Value::Number)
                .ok_or_else(|| self.error(ParseErrorKind::InvalidNumber, token.span)),
            TokenKind::Ident => match token.text {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                _ => Err(self.error(ParseErrorKind::ExpectedValue, token.span)),
            },
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnexpectedEof, token.span)),
            TokenKind::Error => Err(self.lex_error(&token)),
            _ => Err(self.error(ParseErrorKind::ExpectedValue, token.span)),
        }
    }

    fn string(&self, token: &Token<'src>) -> Result<String, ParseError> {
        unquote(token.text)
            .map(Cow::into_owned)
            .map_err(|kind| self.error(kind, token.span))
    }

    fn enter(&mut self, open: Span) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            let limit = self.options.max_depth;
            return Err(self.error(ParseErrorKind::NestingTooDeep { limit }, open));
        }
        Ok(())
    }

    fn parse_object(&mut self, open: Span) -> Result<Object, ParseError> {
        self.enter(open)?;
        let unclosed = ParseErrorKind::UnclosedObject { opened: open };
        let mut object = Object::new();

        loop {
            let token = self.tokens.next();
            let key = match token.kind {
                // Empty object, or a trailing comma
                TokenKind::RBrace => break,
                TokenKind::String => self.string(&token)?,
                TokenKind::Ident => token.text.to_owned(),
                TokenKind::Eof => return Err(self.error(unclosed.clone(), token.span)),
                TokenKind::Error => return Err(self.lex_error(&token)),
                _ => return Err(self.error(ParseErrorKind::ExpectedKey, token.span)),
            };

            let colon = self.tokens.next();
            match colon.kind {
                TokenKind::Colon => {}
                TokenKind::Eof => return Err(self.error(unclosed.clone(), colon.span)),
                TokenKind::Error => return Err(self.lex_error(&colon)),
                _ => return Err(self.error(ParseErrorKind::ExpectedColon, colon.span)),
            }

            let value_token = self.tokens.next();
            if value_token.kind == TokenKind::Eof {
                return Err(self.error(unclosed.clone(), value_token.span));
            }
            let value = self.parse_value(value_token, Some(key.as_str()))?;

            if object.contains_key(&key) {
                debug!(%key, offset = token.span.start, "duplicate key, last value wins");
            }
            trace!(%key, "entry");
            object.insert(key, value);

            let separator = self.tokens.next();
            match separator.kind {
                TokenKind::Comma => continue,
                TokenKind::RBrace => break,
                TokenKind::Eof => return Err(self.error(unclosed.clone(), separator.span)),
                TokenKind::Error => return Err(self.lex_error(&separator)),
                _ => {
                    return Err(self.error(
                        ParseErrorKind::ExpectedCommaOrClose { close: '}' },
                        separator.span,
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(object)
    }

    fn parse_sequence(&mut self, open: Span, is_event_list: bool) -> Result<Sequence, ParseError> {
        self.enter(open)?;
        let unclosed = ParseErrorKind::UnclosedSequence { opened: open };
        let mut sequence = Sequence::default();

        loop {
            let token = self.tokens.next();
            let item = match token.kind {
                // Empty sequence, or a trailing comma
                TokenKind::RBracket => break,
                TokenKind::Eof => return Err(self.error(unclosed.clone(), token.span)),
                TokenKind::String if is_event_list => Value::Object(self.compact_event(&token)?),
                _ => self.parse_value(token, None)?,
            };
            sequence.push(item);

            let separator = self.tokens.next();
            match separator.kind {
                TokenKind::Comma => continue,
                TokenKind::RBracket => break,
                TokenKind::Eof => return Err(self.error(unclosed.clone(), separator.span)),
                TokenKind::Error => return Err(self.lex_error(&separator)),
                _ => {
                    return Err(self.error(
                        ParseErrorKind::ExpectedCommaOrClose { close: ']' },
                        separator.span,
                    ));
                }
            }
        }

        self.depth -= 1;
        Ok(sequence)
    }

    /// Expand a compact event string element of an event list.
    fn compact_event(&self, token: &Token<'src>) -> Result<Object, ParseError> {
        let text = self.string(token)?;
        compact::expand(&text, &self.options.schema).map_err(|kind| self.error(kind, token.span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Value, ParseError> {
        rdlevel_testhelpers::init_tracing();
        Parser::new(source, &ParseOptions::default()).parse()
    }

    fn kind(source: &str) -> ParseErrorKind {
        parse(source).expect_err("should fail").kind
    }

    #[test]
    fn test_scalars() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse(" false ").unwrap(), Value::Bool(false));
        assert_eq!(parse("42").unwrap(), Value::from(42));
        assert_eq!(parse("-0.5").unwrap(), Value::from(-0.5));
        assert_eq!(parse(r#""a\nb""#).unwrap(), Value::from("a\nb"));
    }

    #[test]
    fn test_keywords_are_plain_keys() {
        let value = parse("{true: 1, null: 2}").unwrap();
        assert_eq!(value.get("true"), Some(&Value::from(1)));
        assert_eq!(value.get("null"), Some(&Value::from(2)));
    }

    #[test]
    fn test_bare_word_value_rejected() {
        assert_eq!(kind("{a: yes}"), ParseErrorKind::ExpectedValue);
    }

    #[test]
    fn test_lex_errors_are_classified() {
        assert!(matches!(kind(r#""abc"#), ParseErrorKind::UnterminatedString { .. }));
        assert!(matches!(kind("[1 /* never"), ParseErrorKind::UnterminatedComment { .. }));
        assert_eq!(kind("[1.]"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind("[#]"), ParseErrorKind::UnexpectedCharacter);
    }

    #[test]
    fn test_unterminated_string_points_at_end() {
        let source = r#"{"song": "Chi"#;
        let error = parse(source).unwrap_err();
        assert_eq!(error.span, Span::empty(source.len() as u32));
        match error.kind {
            ParseErrorKind::UnterminatedString { opened } => assert_eq!(opened, Span::new(9, 10)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_containers() {
        assert_eq!(
            kind("{\"a\": 1"),
            ParseErrorKind::UnclosedObject {
                opened: Span::new(0, 1)
            }
        );
        assert_eq!(
            kind("{\"a\":"),
            ParseErrorKind::UnclosedObject {
                opened: Span::new(0, 1)
            }
        );
        assert_eq!(
            kind("[[1, 2]"),
            ParseErrorKind::UnclosedSequence {
                opened: Span::new(0, 1)
            }
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kind(""), ParseErrorKind::UnexpectedEof);
        assert_eq!(kind("  // nothing\n"), ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(kind("{} {}"), ParseErrorKind::TrailingContent);
        assert_eq!(kind("1 2"), ParseErrorKind::TrailingContent);
    }

    #[test]
    fn test_misplaced_commas() {
        assert_eq!(kind("[,]"), ParseErrorKind::ExpectedValue);
        assert_eq!(kind("{,}"), ParseErrorKind::ExpectedKey);
        assert_eq!(kind("[1,,2]"), ParseErrorKind::ExpectedValue);
        assert_eq!(kind("[1,2,,]"), ParseErrorKind::ExpectedValue);
        assert_eq!(kind("{\"a\" 1}"), ParseErrorKind::ExpectedColon);
        assert_eq!(kind("[1 2]"), ParseErrorKind::ExpectedCommaOrClose { close: ']' });
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::default().max_depth(3);
        let ok = Parser::new("[[[1]]]", &options).parse();
        assert!(ok.is_ok());

        let error = Parser::new("[[[[1]]]]", &options).parse().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::NestingTooDeep { limit: 3 });
        assert_eq!(error.span, Span::new(3, 4));
    }

    #[test]
    fn test_default_depth_limit_stops_runaway_nesting() {
        let source = "[".repeat(10_000);
        assert_eq!(kind(&source), ParseErrorKind::NestingTooDeep { limit: 128 });
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        let value = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(object.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn test_compact_events_only_under_event_keys() {
        let value = parse(r#"{"events": ["Comment,1,2,hi"], "other": ["Comment,1,2,hi"]}"#).unwrap();
        assert_eq!(value.get("events[0].type"), Some(&Value::from("Comment")));
        assert_eq!(value.get("events[0].text"), Some(&Value::from("hi")));
        assert_eq!(value.get("other[0]"), Some(&Value::from("Comment,1,2,hi")));
    }

    #[test]
    fn test_compact_event_error_carries_token_span() {
        let source = r#"{"events": [{"type": "Comment"}, "Teleport,1,1"]}"#;
        let error = parse(source).unwrap_err();
        assert_eq!(
            error.kind,
            ParseErrorKind::UnknownEventType {
                name: "Teleport".to_owned()
            }
        );
        assert_eq!(error.span.slice(source), r#""Teleport,1,1""#);
    }

    #[test]
    fn test_document_requires_object_root() {
        let options = ParseOptions::default();
        let error = Parser::new("  [1]", &options).parse_document().unwrap_err();
        assert_eq!(error.kind, ParseErrorKind::ExpectedObjectRoot);
        assert_eq!(error.span, Span::new(2, 3));
    }
}
