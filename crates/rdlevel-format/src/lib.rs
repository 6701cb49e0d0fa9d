//! Canonical JSON output for rdlevel documents.
//!
//! Parsing is lenient; output is not. Everything written here is strict
//! JSON that any JSON reader accepts. Any value that [`rdlevel_tree::parse`]
//! produced reads back to an equal value.
//!
//! A hand-built value with a string directly inside an event list is the
//! exception: the output is still valid JSON, but the default parser reads
//! that string as a compact event. Read such output with no
//! `event_list_keys` set.

use rdlevel_tree::{Document, Value};
use tracing::trace;

mod options;
mod scalar;
mod writer;

pub use options::FormatOptions;
pub use scalar::{escape_string, format_number};
pub use writer::JsonWriter;

/// Format a value as compact JSON.
pub fn to_string(value: &Value) -> String {
    let mut writer = JsonWriter::compact();
    writer.write_value(value);
    let out = writer.finish();
    trace!(len = out.len(), "formatted compact");
    out
}

/// Format a value as indented JSON.
pub fn to_string_pretty(value: &Value, options: &FormatOptions) -> String {
    let mut writer = JsonWriter::pretty(options.clone());
    writer.write_value(value);
    let out = writer.finish();
    trace!(len = out.len(), "formatted pretty");
    out
}

/// Format a document as indented JSON.
pub fn format_document(document: &Document, options: &FormatOptions) -> String {
    let mut writer = JsonWriter::pretty(options.clone());
    writer.write_object(&document.root);
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Value {
        rdlevel_testhelpers::init_tracing();
        rdlevel_tree::parse(source).unwrap()
    }

    #[test]
    fn test_compact() {
        let value = parse(r#"{ a: [1, 2.0, "x"], b: { c: null, d: true }, e: [], f: {} }"#);
        insta::assert_snapshot!(to_string(&value), @r#"{"a":[1,2.0,"x"],"b":{"c":null,"d":true},"e":[],"f":{}}"#);
    }

    #[test]
    fn test_compact_escapes() {
        let value = Value::from("quote \" slash \\ newline \n");
        insta::assert_snapshot!(to_string(&value), @r#""quote \" slash \\ newline \n""#);
    }

    #[test]
    fn test_pretty_level_layout() {
        let value = parse(
            r#"{
                settings: { song: "Chips", tags: "a, b" },
                rows: [{ row: 0, rooms: [0] }],
                events: ["Comment,1,1,hi", { type: "Custom", data: { nested: 1 } }],
            }"#,
        );
        let options = FormatOptions::default().indent("  ");
        assert_eq!(
            to_string_pretty(&value, &options),
            r#"{
  "settings": {
    "song": "Chips",
    "tags": "a, b"
  },
  "rows": [
    { "row": 0, "rooms": [0] }
  ],
  "events": [
    { "type": "Comment", "bar": 1, "beat": 1, "text": "hi" },
    {
      "type": "Custom",
      "data": {
        "nested": 1
      }
    }
  ]
}"#
        );
    }

    #[test]
    fn test_pretty_multiline() {
        let value = parse("[[1, 2], {a: 1}]");
        let options = FormatOptions::default().indent(" ").multiline();
        assert_eq!(
            to_string_pretty(&value, &options),
            "[\n [\n  1,\n  2\n ],\n {\n  \"a\": 1\n }\n]"
        );
    }

    #[test]
    fn test_pretty_scalar_root() {
        assert_eq!(to_string_pretty(&Value::from(1.5), &FormatOptions::default()), "1.5");
    }

    #[test]
    fn test_format_document() {
        let doc = rdlevel_tree::Document::parse("{a: [], b: 2}").unwrap();
        assert_eq!(
            format_document(&doc, &FormatOptions::default()),
            "{\n\t\"a\": [],\n\t\"b\": 2\n}"
        );
    }
}
