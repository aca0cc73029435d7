//! Options for reading and writing catalogs.

/// Default wrap width for entry bodies.
pub const DEFAULT_LINE_WIDTH: usize = 50;

/// Parse behavior options for [`crate::parser`] entry points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Rejects body entries with a non-empty translation.
    pub template: bool,
}

impl ParseOptions {
    /// Creates default parse options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for reading a POT template.
    pub fn template() -> Self {
        Self { template: true }
    }

    /// Enables/disables template mode.
    pub fn with_template(mut self, template: bool) -> Self {
        self.template = template;
        self
    }
}

/// Write behavior options for [`crate::writer`] entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Fails instead of replacing an existing destination file.
    pub without_overwriting: bool,
    /// Wrap width for body entries. The header is never wrapped.
    pub line_width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            without_overwriting: false,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl WriteOptions {
    /// Creates default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables the no-overwrite guard.
    pub fn with_without_overwriting(mut self, without_overwriting: bool) -> Self {
        self.without_overwriting = without_overwriting;
        self
    }

    /// Sets the body wrap width.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }
}
