//! Indented line writer for generated source.

/// Accumulates lines of source at the current indentation level.
#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    level: usize,
}

const INDENT: &str = "    ";

impl SourceWriter {
    /// Empty writer at level 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current level.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.output.push_str(INDENT);
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Writes a snippet line by line at the current level.
    ///
    /// Leading and trailing blank lines are dropped; each line's own
    /// content is kept as is.
    pub fn snippet(&mut self, code: &str) {
        for line in code.trim_matches('\n').lines() {
            self.line(line.trim_end());
        }
    }

    /// Writes `header {`, then runs `body` one level deeper, then `}`.
    pub fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(format!("{} {{", header.as_ref()));
        self.indent();
        body(self);
        self.dedent();
        self.line("}");
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation level.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Finished source.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}
