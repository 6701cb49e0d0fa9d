//! Options controlling how lenient the parser is.

use std::borrow::Cow;

use crate::EventSchema;

/// Options for parsing rdlevel sources.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Schema used to expand compact event strings (default: builtin).
    pub schema: Cow<'static, EventSchema>,

    /// Keys whose sequence values are event lists (default: `["events"]`).
    pub event_list_keys: Vec<String>,

    /// Patch the editor's missing-comma bug before parsing (default: false).
    ///
    /// Error positions then refer to the patched text.
    pub repair_missing_commas: bool,

    /// Maximum nesting of objects and sequences (default: 128).
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            schema: Cow::Borrowed(EventSchema::builtin()),
            event_list_keys: vec!["events".to_string()],
            repair_missing_commas: false,
            max_depth: 128,
        }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom event schema.
    pub fn schema(mut self, schema: EventSchema) -> Self {
        self.schema = Cow::Owned(schema);
        self
    }

    /// Treat sequences under `key` as event lists too.
    pub fn event_list_key(mut self, key: impl Into<String>) -> Self {
        self.event_list_keys.push(key.into());
        self
    }

    /// Enable or disable the missing-comma repair pass.
    pub fn repair_missing_commas(mut self, enabled: bool) -> Self {
        self.repair_missing_commas = enabled;
        self
    }

    /// Set the maximum nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether a sequence under `key` is an event list.
    pub fn is_event_list_key(&self, key: &str) -> bool {
        self.event_list_keys.iter().any(|k| k == key)
    }
}
