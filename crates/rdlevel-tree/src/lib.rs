//! Lenient parser and document tree for Rhythm Doctor `.rdlevel` files.
//!
//! The format is JSON with a few leniencies: `//` and `/* */` comments,
//! trailing commas, bare identifier keys, and compact event strings such as
//! `"Flash,1,0.5,..."` inside event lists, which expand into objects using
//! an [`EventSchema`].
//!
//! ```
//! let doc = rdlevel_tree::Document::parse(r#"{
//!     settings: { song: "Chips" },   // bare key
//!     events: ["Comment,1,1,hello",],
//! }"#).unwrap();
//!
//! assert_eq!(doc.get("settings.song").and_then(|v| v.as_str()), Some("Chips"));
//! assert_eq!(doc.get("events[0].type").and_then(|v| v.as_str()), Some("Comment"));
//! ```

use std::borrow::Cow;

use tracing::debug;

mod compact;
mod diagnostic;
mod error;
mod level;
mod options;
mod parser;
mod repair;
mod scalar;
mod schema;
mod value;

pub use diagnostic::ParseError;
pub use error::{ErrorCategory, ParseErrorKind};
pub use level::{
    CanBePlayedOn, Difficulty, FirstBeatBehavior, Level, LevelError, LevelSettings,
    MultiplayerAppearance, SpecialArtistType,
};
pub use options::ParseOptions;
pub use rdlevel_tokenizer::Span;
pub use schema::EventSchema;
pub use value::{Entry, Number, Object, Sequence, Value};

use parser::Parser;
use value::split_path;

/// Parse an rdlevel source into a value tree, with default options.
pub fn parse(source: &str) -> Result<Value, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse an rdlevel source into a value tree.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Value, ParseError> {
    let source = prepare(source, options);
    let value = Parser::new(&source, options).parse()?;
    debug!(kind = value.kind_name(), "parsed rdlevel source");
    Ok(value)
}

fn prepare<'a>(source: &'a str, options: &ParseOptions) -> Cow<'a, str> {
    if options.repair_missing_commas {
        repair::repair_missing_commas(source)
    } else {
        Cow::Borrowed(source)
    }
}

/// An rdlevel document (root is always an object).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// The root object.
    pub root: Object,
}

impl Document {
    /// Parse an rdlevel document with default options.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, &ParseOptions::default())
    }

    /// Parse an rdlevel document.
    ///
    /// Fails with [`ParseErrorKind::ExpectedObjectRoot`] when the root value
    /// is not an object.
    pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let source = prepare(source, options);
        let root = Parser::new(&source, options).parse_document()?;
        debug!(entries = root.len(), "parsed rdlevel document");
        Ok(Document { root })
    }

    /// Get a value by path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return None;
        }

        let (segment, rest) = split_path(path);
        let value = self.root.get(segment)?;
        if rest.is_empty() {
            Some(value)
        } else {
            value.get(rest)
        }
    }

    /// Convert into a plain object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}
