//! Formatting options for rdlevel output.

/// Options for pretty output.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Indentation string (default: "\t", as the level editor writes it)
    pub indent: &'static str,

    /// Keep sequences of scalars on one line, e.g. `"rooms": [0, 1]`
    /// (default: true)
    pub inline_scalar_sequences: bool,

    /// Keep objects inside sequences on one line when they hold only
    /// scalars and scalar sequences, the way the editor writes events
    /// (default: true)
    pub inline_flat_items: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: "\t",
            inline_scalar_sequences: true,
            inline_flat_items: true,
        }
    }
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom indentation string.
    pub fn indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    /// Expand every container onto its own lines.
    pub fn multiline(mut self) -> Self {
        self.inline_scalar_sequences = false;
        self.inline_flat_items = false;
        self
    }
}
