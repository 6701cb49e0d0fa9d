//! JSON output writer for rdlevel values.

use rdlevel_tree::{Object, Sequence, Value};

use crate::FormatOptions;
use crate::scalar::{escape_string, format_number};

/// How a single container is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// No whitespace at all.
    Compact,
    /// One line: `[0, 1]`, `{ "bar": 1 }`.
    Inline,
    /// One item per line, indented.
    Block,
}

/// Writes values as JSON text, compact or pretty.
///
/// The output is strict JSON: no comments, no trailing commas, quoted keys
/// and no compact event strings.
pub struct JsonWriter {
    out: String,
    /// `None` writes compact output.
    options: Option<FormatOptions>,
    depth: usize,
    /// Set while inside an inline container; everything nested stays inline.
    inline: bool,
}

impl JsonWriter {
    /// Writer producing output without any whitespace.
    pub fn compact() -> Self {
        Self {
            out: String::new(),
            options: None,
            depth: 0,
            inline: false,
        }
    }

    /// Writer producing indented output.
    pub fn pretty(options: FormatOptions) -> Self {
        Self {
            options: Some(options),
            ..Self::compact()
        }
    }

    /// Consume the writer and return the output.
    pub fn finish(self) -> String {
        self.out
    }

    /// Write any value.
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(number) => self.out.push_str(&format_number(*number)),
            Value::String(s) => self.write_string(s),
            Value::Sequence(seq) => self.write_sequence(seq),
            Value::Object(obj) => self.write_object_with(obj, false),
        }
    }

    /// Write an object.
    pub fn write_object(&mut self, obj: &Object) {
        self.write_object_with(obj, false);
    }

    fn write_string(&mut self, s: &str) {
        self.out.push('"');
        self.out.push_str(&escape_string(s));
        self.out.push('"');
    }

    fn write_object_with(&mut self, obj: &Object, inline_here: bool) {
        if obj.is_empty() {
            self.out.push_str("{}");
            return;
        }

        let layout = self.layout(inline_here);
        let saved = self.open('{', layout);
        for (index, (key, value)) in obj.iter().enumerate() {
            self.item_gap(layout, true, index == 0);
            self.write_string(key);
            self.out.push(':');
            if layout != Layout::Compact {
                self.out.push(' ');
            }
            self.write_value(value);
        }
        self.close('}', layout, true, saved);
    }

    fn write_sequence(&mut self, seq: &Sequence) {
        if seq.is_empty() {
            self.out.push_str("[]");
            return;
        }

        let (inline_scalars, inline_items) = match &self.options {
            Some(options) => (options.inline_scalar_sequences, options.inline_flat_items),
            None => (false, false),
        };

        let layout = self.layout(inline_scalars && seq.iter().all(is_scalar));
        let saved = self.open('[', layout);
        for (index, item) in seq.iter().enumerate() {
            self.item_gap(layout, false, index == 0);
            match item {
                Value::Object(obj) => self.write_object_with(obj, inline_items && is_flat(obj)),
                other => self.write_value(other),
            }
        }
        self.close(']', layout, false, saved);
    }

    fn layout(&self, inline_here: bool) -> Layout {
        match self.options {
            None => Layout::Compact,
            Some(_) if self.inline || inline_here => Layout::Inline,
            Some(_) => Layout::Block,
        }
    }

    /// Write the opening delimiter; returns the previous inline state.
    fn open(&mut self, delimiter: char, layout: Layout) -> bool {
        self.out.push(delimiter);
        self.depth += 1;
        let saved = self.inline;
        if layout == Layout::Inline {
            self.inline = true;
        }
        saved
    }

    /// Separator before an item. Inline objects are padded: `{ "a": 1 }`.
    fn item_gap(&mut self, layout: Layout, padded: bool, first: bool) {
        if !first {
            self.out.push(',');
        }
        match layout {
            Layout::Compact => {}
            Layout::Inline => {
                if padded || !first {
                    self.out.push(' ');
                }
            }
            Layout::Block => self.newline_indent(),
        }
    }

    fn close(&mut self, delimiter: char, layout: Layout, padded: bool, saved: bool) {
        self.depth -= 1;
        self.inline = saved;
        match layout {
            Layout::Compact => {}
            Layout::Inline => {
                if padded {
                    self.out.push(' ');
                }
            }
            Layout::Block => self.newline_indent(),
        }
        self.out.push(delimiter);
    }

    fn newline_indent(&mut self) {
        self.out.push('\n');
        if let Some(options) = &self.options {
            for _ in 0..self.depth {
                self.out.push_str(options.indent);
            }
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Sequence(_) | Value::Object(_))
}

/// Only scalars and sequences of scalars.
fn is_flat(obj: &Object) -> bool {
    obj.iter().all(|(_, value)| match value {
        Value::Sequence(seq) => seq.iter().all(is_scalar),
        other => is_scalar(other),
    })
}
