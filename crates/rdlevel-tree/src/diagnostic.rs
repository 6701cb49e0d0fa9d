//! Diagnostic rendering for parser errors.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use rdlevel_tokenizer::Span;

use crate::{ErrorCategory, ParseErrorKind};

/// A parser error with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 1-based column (in characters) of `span.start`.
    pub column: u32,
}

impl ParseError {
    /// Create a new parse error, resolving its line and column in `source`.
    pub fn new(kind: ParseErrorKind, span: Span, source: &str) -> Self {
        let (line, column) = span.line_col(source);
        Self {
            kind,
            span,
            line,
            column,
        }
    }

    /// Which class of error this is.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Whether this is a plain syntax error.
    pub fn is_syntax(&self) -> bool {
        self.category() == ErrorCategory::Syntax
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, Range<usize>)> {
        let range = Range::<usize>::from(self.span);
        // Spans are byte offsets
        let report = Report::build(ReportKind::Error, (filename, range.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_message(self.kind.message());

        match &self.kind {
            ParseErrorKind::UnterminatedString { opened } => report
                .with_label(
                    Label::new((filename, Range::<usize>::from(*opened)))
                        .with_message("string starts here")
                        .with_color(Color::Blue),
                )
                .with_label(
                    Label::new((filename, range))
                        .with_message("input ends before the closing quote")
                        .with_color(Color::Red),
                )
                .with_help("add a closing '\"'"),

            ParseErrorKind::UnterminatedComment { opened } => report
                .with_label(
                    Label::new((filename, Range::<usize>::from(*opened)))
                        .with_message("comment starts here")
                        .with_color(Color::Blue),
                )
                .with_label(
                    Label::new((filename, range))
                        .with_message("input ends inside the comment")
                        .with_color(Color::Red),
                )
                .with_help("add a closing '*/'"),

            ParseErrorKind::UnclosedObject { opened } => report
                .with_label(
                    Label::new((filename, Range::<usize>::from(*opened)))
                        .with_message("object opened here")
                        .with_color(Color::Blue),
                )
                .with_label(
                    Label::new((filename, range))
                        .with_message("input ends here")
                        .with_color(Color::Red),
                )
                .with_help("add a closing '}'"),

            ParseErrorKind::UnclosedSequence { opened } => report
                .with_label(
                    Label::new((filename, Range::<usize>::from(*opened)))
                        .with_message("sequence opened here")
                        .with_color(Color::Blue),
                )
                .with_label(
                    Label::new((filename, range))
                        .with_message("input ends here")
                        .with_color(Color::Red),
                )
                .with_help("add a closing ']'"),

            ParseErrorKind::InvalidEscape(_) => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("invalid escape")
                        .with_color(Color::Red),
                )
                .with_help("valid escapes are: \\\", \\\\, \\/, \\b, \\f, \\n, \\r, \\t, \\uXXXX"),

            ParseErrorKind::ExpectedColon => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("expected ':' here")
                        .with_color(Color::Red),
                )
                .with_help("object entries are written `key: value`"),

            ParseErrorKind::ExpectedCommaOrClose { close } => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("unexpected")
                        .with_color(Color::Red),
                )
                .with_help(format!("separate items with ',' or close with '{close}'")),

            ParseErrorKind::TrailingContent => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("unexpected content here")
                        .with_color(Color::Red),
                )
                .with_help("a level holds exactly one root value"),

            ParseErrorKind::UnknownEventType { .. } => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("event tag not in the schema")
                        .with_color(Color::Red),
                )
                .with_help("compact events are written \"Tag,field,...\" with a known tag"),

            ParseErrorKind::FieldCountMismatch { expected, .. } => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("wrong number of fields")
                        .with_color(Color::Red),
                )
                .with_help(format!("this event needs exactly {expected} comma-separated fields after its tag")),

            ParseErrorKind::MalformedEvent => report
                .with_label(
                    Label::new((filename, range))
                        .with_message("unbalanced quote in event fields")
                        .with_color(Color::Red),
                )
                .with_help("quoted fields are closed with '\"'; write '\"\"' for a literal quote"),

            _ => report.with_label(
                Label::new((filename, range))
                    .with_message(self.kind.message())
                    .with_color(Color::Red),
            ),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind.message(),
            self.line,
            self.column
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_for(source: &str) -> ParseError {
        rdlevel_testhelpers::init_tracing();
        crate::parse(source).expect_err("source should not parse")
    }

    fn render_plain(error: &ParseError, source: &str) -> String {
        let rendered = error.render("main.rdlevel", source);
        String::from_utf8(strip_ansi_escapes::strip(rendered)).unwrap()
    }

    #[test]
    fn test_display() {
        let error = error_for("{\n  \"song\": \"Chips\"\n  \"bpm\": 1\n}");
        insta::assert_snapshot!(error.to_string(), @"expected ',' or '}' at line 3, column 3");
    }

    #[test]
    fn test_unclosed_object_diagnostic() {
        let source = "{\"settings\": {\"song\": \"Chips\"}";
        let error = error_for(source);
        let rendered = render_plain(&error, source);
        assert!(rendered.contains("unclosed object"), "{rendered}");
        assert!(rendered.contains("object opened here"), "{rendered}");
        assert!(rendered.contains("main.rdlevel"), "{rendered}");
        assert!(rendered.contains("add a closing '}'"), "{rendered}");
    }

    #[test]
    fn test_unterminated_string_diagnostic() {
        let source = "{\"song\": \"Chi";
        let error = error_for(source);
        let rendered = render_plain(&error, source);
        assert!(rendered.contains("unterminated string"), "{rendered}");
        assert!(rendered.contains("string starts here"), "{rendered}");
    }

    #[test]
    fn test_unknown_event_diagnostic() {
        let source = r#"{"events": ["Teleport,1,2"]}"#;
        let error = error_for(source);
        let rendered = render_plain(&error, source);
        assert!(rendered.contains("unknown event type `Teleport`"), "{rendered}");
        assert!(rendered.contains("event tag not in the schema"), "{rendered}");
    }
}
