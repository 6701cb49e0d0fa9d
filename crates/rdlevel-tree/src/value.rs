//! Value types for rdlevel documents.
//!
//! The value model is exactly JSON's: null, booleans, numbers, strings,
//! sequences and objects. The leniency of the format lives entirely in the
//! parser; once parsed, a level is an ordinary tree.

use std::fmt;

/// An rdlevel value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number, integer or floating point.
    Number(Number),
    /// A string, escapes already processed.
    String(String),
    /// Sequence `[a, b, c]`.
    Sequence(Sequence),
    /// Object `{key: value, ...}`.
    Object(Object),
}

/// A numeric value.
///
/// Literals without a fraction or exponent are integers: `i64` when they
/// fit, `u64` above `i64::MAX`. Everything else is a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal: `42`, `-7`.
    Integer(i64),
    /// Integer literal above `i64::MAX`, kept exact.
    UInt(u64),
    /// Float literal: `0.5`, `1e3`, or an integer too large for `u64`.
    Float(f64),
}

/// A sequence of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    /// Items in the sequence.
    pub items: Vec<Value>,
}

/// An object (mapping of string keys to values), in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    /// Entries in the object.
    pub entries: Vec<Entry>,
}

/// An entry in an object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The key. Bare and quoted keys both end up here as plain strings.
    pub key: String,
    /// The value.
    pub value: Value,
}

impl Value {
    /// Create a string value.
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// Create a sequence with items.
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence { items })
    }

    /// Create an empty object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Check if this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as integer. Floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(Number::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Get as unsigned integer. Negative integers and floats give `None`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(Number::Integer(i)) => u64::try_from(*i).ok(),
            Value::Number(Number::UInt(u)) => Some(*u),
            _ => None,
        }
    }

    /// Get as float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as mutable object.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as sequence.
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Get as mutable sequence.
    pub fn as_sequence_mut(&mut self) -> Option<&mut Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Object(_) => "object",
        }
    }

    /// Get a value by path.
    ///
    /// Path segments are separated by `.`.
    /// Use `[n]` for sequence indexing: `events[3].type`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }

        let (segment, rest) = split_path(path);

        let value = match self {
            Value::Object(obj) => obj.get(segment)?,
            Value::Sequence(seq) => seq.get(parse_index(segment)?)?,
            _ => return None,
        };
        value.get(rest)
    }

    /// Get a mutable value by path.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        if path.is_empty() {
            return Some(self);
        }

        let (segment, rest) = split_path(path);

        let value = match self {
            Value::Object(obj) => obj.get_mut(segment)?,
            Value::Sequence(seq) => seq.get_mut(parse_index(segment)?)?,
            _ => return None,
        };
        value.get_mut(rest)
    }
}

impl Number {
    /// Widen to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }

    /// Whether this is an integer.
    pub fn is_integer(self) -> bool {
        matches!(self, Number::Integer(_) | Number::UInt(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

impl Object {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get entry value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    /// Get mutable entry value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// Iterate over entries as (key, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    /// Iterate over keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Check if key exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or update an entry.
    ///
    /// An existing key keeps its position and gets the new value; the
    /// previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            Some(std::mem::replace(&mut entry.value, value))
        } else {
            self.entries.push(Entry { key, value });
            None
        }
    }

    /// Remove an entry by key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(index).value)
    }
}

impl Sequence {
    /// Get item by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Get mutable item by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Push an item.
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => Value::Number(Number::Integer(i)),
            Err(_) => Value::Number(Number::UInt(u)),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::seq(items)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// Parse a `[n]` path segment.
fn parse_index(segment: &str) -> Option<usize> {
    segment.strip_prefix('[')?.strip_suffix(']')?.parse().ok()
}

/// Split path at first `.` or `[`.
pub(crate) fn split_path(path: &str) -> (&str, &str) {
    // Handle [n] at start
    if path.starts_with('[')
        && let Some(end) = path.find(']')
    {
        let segment = &path[..=end];
        let rest = &path[end + 1..];
        // Skip leading `.` in rest
        let rest = rest.strip_prefix('.').unwrap_or(rest);
        return (segment, rest);
    }

    // Find first `.` or `[`
    let dot_pos = path.find('.');
    let bracket_pos = path.find('[');

    match (dot_pos, bracket_pos) {
        (Some(d), Some(b)) if b < d => (&path[..b], &path[b..]),
        (Some(d), _) => (&path[..d], &path[d + 1..]),
        (None, Some(b)) => (&path[..b], &path[b..]),
        (None, None) => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("foo"), ("foo", ""));
        assert_eq!(split_path("foo.bar"), ("foo", "bar"));
        assert_eq!(split_path("foo.bar.baz"), ("foo", "bar.baz"));
        assert_eq!(split_path("[0]"), ("[0]", ""));
        assert_eq!(split_path("[0].foo"), ("[0]", "foo"));
        assert_eq!(split_path("foo[0]"), ("foo", "[0]"));
        assert_eq!(split_path("foo[0].bar"), ("foo", "[0].bar"));
    }

    #[test]
    fn test_object_insert_replaces_in_place() {
        let mut obj = Object::new();
        assert_eq!(obj.insert("a", Value::from(1)), None);
        assert_eq!(obj.insert("b", Value::from(2)), None);
        assert_eq!(obj.insert("a", Value::from(3)), Some(Value::from(1)));

        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&Value::from(3)));
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn test_object_remove() {
        let mut obj: Object = [("x", Value::Null), ("y", Value::from(true))]
            .into_iter()
            .collect();
        assert_eq!(obj.remove("x"), Some(Value::Null));
        assert_eq!(obj.remove("x"), None);
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn test_value_path_access() {
        let event: Object = [
            ("type", Value::from("PlaySong")),
            ("bar", Value::from(1)),
        ]
        .into_iter()
        .collect();
        let settings: Object = [("song", Value::from("Chips"))].into_iter().collect();
        let value = Value::Object(
            [
                ("settings", Value::from(settings)),
                ("events", Value::seq(vec![Value::from(event)])),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(
            value.get("settings.song").and_then(Value::as_str),
            Some("Chips")
        );
        assert_eq!(
            value.get("events[0].type").and_then(Value::as_str),
            Some("PlaySong")
        );
        assert_eq!(value.get("events[0].bar").and_then(Value::as_i64), Some(1));
        assert_eq!(value.get("events[1]"), None);
        assert_eq!(value.get("settings[0]"), None);
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut value = Value::Object([("rows", Value::seq(vec![Value::Null]))].into_iter().collect());
        *value.get_mut("rows[0]").unwrap() = Value::from(7);
        assert_eq!(value.get("rows[0]"), Some(&Value::from(7)));
    }

    #[test]
    fn test_number_widening() {
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::from(0.5).as_i64(), None);
        assert!(Number::Integer(1) != Number::Float(1.0));
    }

    #[test]
    fn test_unsigned_integers() {
        assert_eq!(Value::from(5u64), Value::from(5));
        assert_eq!(Value::from(u64::MAX), Value::Number(Number::UInt(u64::MAX)));
        assert_eq!(Value::from(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(Value::from(u64::MAX).as_i64(), None);
        assert_eq!(Value::from(-1).as_u64(), None);
        assert!(Number::UInt(u64::MAX).is_integer());
        assert_eq!(Number::UInt(u64::MAX).to_string(), "18446744073709551615");
    }
}
