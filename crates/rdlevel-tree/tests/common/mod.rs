//! Shared helpers for integration tests.

#![allow(dead_code)]

use rdlevel_tree::{Number, ParseOptions, Value};

/// Options that treat the input as plain JSON plus leniencies, with no
/// event lists.
pub fn plain_options() -> ParseOptions {
    ParseOptions {
        event_list_keys: Vec::new(),
        ..ParseOptions::default()
    }
}

/// Convert a parsed value into `serde_json`'s model for comparison.
///
/// `serde_json` maps are sorted by key, so comparisons ignore key order.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(Number::Integer(i)) => serde_json::Value::from(*i),
        Value::Number(Number::UInt(u)) => serde_json::Value::from(*u),
        Value::Number(Number::Float(f)) => serde_json::Value::from(*f),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(seq) => serde_json::Value::Array(seq.iter().map(to_json).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.iter()
                .map(|(key, value)| (key.to_owned(), to_json(value)))
                .collect(),
        ),
    }
}

/// Parse as plain JSON and convert for comparison with `serde_json`.
pub fn parse_json(source: &str) -> serde_json::Value {
    let value = rdlevel_tree::parse_with(source, &plain_options())
        .unwrap_or_else(|e| panic!("{source:?} should parse: {e}"));
    to_json(&value)
}
