//! String and number literal decoding.

use std::borrow::Cow;

use crate::{Number, ParseErrorKind};

/// Decode a quoted string token (quotes included).
///
/// Raw control characters between the quotes are kept as-is.
pub(crate) fn unquote(token: &str) -> Result<Cow<'_, str>, ParseErrorKind> {
    let inner = &token[1..token.len() - 1];
    unescape(inner)
}

/// Process JSON escapes in string content.
pub(crate) fn unescape(s: &str) -> Result<Cow<'_, str>, ParseErrorKind> {
    if !s.contains('\\') {
        return Ok(Cow::Borrowed(s));
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000c}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('u') => result.push(unicode_escape(&mut chars)?),
            Some(other) => return Err(ParseErrorKind::InvalidEscape(format!("\\{other}"))),
            None => return Err(ParseErrorKind::InvalidEscape("\\".to_string())),
        }
    }
    Ok(Cow::Owned(result))
}

/// Decode the `XXXX` after `\u`, pairing surrogates.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, ParseErrorKind> {
    let high = hex4(chars)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).ok_or_else(|| invalid_unicode(high));
    }

    // High surrogate: a `\uXXXX` low surrogate must follow
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return Err(invalid_unicode(high));
    }
    let low = hex4(&mut lookahead)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(invalid_unicode(high));
    }
    *chars = lookahead;
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code).ok_or_else(|| invalid_unicode(code))
}

fn hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, ParseErrorKind> {
    let digits: String = chars.take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseErrorKind::InvalidEscape(format!("\\u{digits}")));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|_| ParseErrorKind::InvalidEscape(format!("\\u{digits}")))
}

fn invalid_unicode(code: u32) -> ParseErrorKind {
    ParseErrorKind::InvalidEscape(format!("\\u{code:04X}"))
}

/// Parse text as a JSON number.
///
/// Returns `None` when the text is not in JSON number syntax or its
/// magnitude overflows `f64`.
pub(crate) fn parse_number(text: &str) -> Option<Number> {
    if !is_number_syntax(text) {
        return None;
    }
    let is_integer = !text.contains(['.', 'e', 'E']);
    if is_integer {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number::Integer(i));
        }
        if let Ok(u) = text.parse::<u64>() {
            return Some(Number::UInt(u));
        }
    }
    let f: f64 = text.parse().ok()?;
    f.is_finite().then_some(Number::Float(f))
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_number_syntax(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i > start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !digits(&mut i) {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !digits(&mut i) {
            return false;
        }
    }
    i == bytes.len()
}
