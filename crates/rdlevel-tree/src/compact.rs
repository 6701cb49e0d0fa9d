//! Compact event strings.
//!
//! Inside an event list, a string element `"Tag,field1,...,fieldN"` is
//! shorthand for `{"type": "Tag", <name1>: field1, ...}` with field names
//! taken from the [`EventSchema`]. Fields are split on commas outside of
//! double quotes; `""` inside a quoted field is a literal quote.

use tracing::debug;

use crate::scalar::parse_number;
use crate::{EventSchema, Object, ParseErrorKind, Value};

/// One positional field of a compact event.
#[derive(Debug, PartialEq)]
struct Field {
    text: String,
    quoted: bool,
}

impl Field {
    /// Unquoted fields in number syntax become numbers; everything else
    /// stays a string.
    fn into_value(self) -> Value {
        if !self.quoted
            && let Some(number) = parse_number(&self.text)
        {
            return Value::Number(number);
        }
        Value::String(self.text)
    }
}

/// Expand a compact event string into an event object.
pub(crate) fn expand(text: &str, schema: &EventSchema) -> Result<Object, ParseErrorKind> {
    let mut fields = split_fields(text)?.into_iter();
    let tag = fields.next().map(|f| f.text).unwrap_or_default();

    let Some(names) = schema.fields(&tag) else {
        return Err(ParseErrorKind::UnknownEventType { name: tag });
    };

    let values: Vec<Field> = fields.collect();
    if values.len() != names.len() {
        return Err(ParseErrorKind::FieldCountMismatch {
            event: tag,
            expected: names.len(),
            found: values.len(),
        });
    }

    debug!(event = %tag, fields = values.len(), "expanded compact event");

    let mut event = Object::new();
    event.insert("type", Value::String(tag));
    for (name, field) in names.iter().zip(values) {
        event.insert(name.as_str(), field.into_value());
    }
    Ok(event)
}

/// Split on commas that are not inside double quotes.
///
/// Whitespace around each field is dropped. A quote in the middle of an
/// unquoted field is kept literally.
fn split_fields(text: &str) -> Result<Vec<Field>, ParseErrorKind> {
    let mut fields = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let field = if chars.next_if_eq(&'"').is_some() {
            let mut value = String::new();
            loop {
                match chars.next() {
                    None => return Err(ParseErrorKind::MalformedEvent),
                    Some('"') if chars.next_if_eq(&'"').is_some() => value.push('"'),
                    Some('"') => break,
                    Some(c) => value.push(c),
                }
            }
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            if !matches!(chars.peek(), None | Some(',')) {
                return Err(ParseErrorKind::MalformedEvent);
            }
            Field {
                text: value,
                quoted: true,
            }
        } else {
            let mut value = String::new();
            while let Some(c) = chars.next_if(|c| *c != ',') {
                value.push(c);
            }
            value.truncate(value.trim_end().len());
            Field {
                text: value,
                quoted: false,
            }
        };
        fields.push(field);

        // Either a comma or the end of the string follows
        if chars.next().is_none() {
            break;
        }
    }

    Ok(fields)
}
