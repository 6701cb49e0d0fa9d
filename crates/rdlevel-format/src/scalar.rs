//! Scalar output: string escaping and number formatting.

use std::borrow::Cow;

use rdlevel_tree::Number;

/// Escape a string for output between double quotes.
///
/// Returns the escaped content (without surrounding quotes).
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| matches!(c, '"' | '\\') || c.is_control()) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{0008}' => result.push_str("\\b"),
            '\u{000c}' => result.push_str("\\f"),
            c if c.is_control() => {
                let code = c as u32;
                result.push_str(&format!("\\u{code:04x}"));
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Format a number so that it parses back to the same variant.
///
/// Floats always carry a fraction or an exponent.
pub fn format_number(number: Number) -> String {
    match number {
        Number::Integer(i) => i.to_string(),
        Number::UInt(u) => u.to_string(),
        Number::Float(f) => {
            // Debug output is the shortest text that round-trips
            let mut text = format!("{f:?}");
            if !text.contains(['.', 'e', 'E']) {
                text.push_str(".0");
            }
            text
        }
    }
}
