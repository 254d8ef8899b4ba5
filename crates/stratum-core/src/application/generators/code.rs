//! Indentation-aware text builder used by every template.

const INDENT: &str = "    ";

/// Accumulates C#-style source with brace-tracked indentation.
#[derive(Debug, Default)]
pub(crate) struct CodeBuilder {
    out: String,
    depth: usize,
}

impl CodeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// One line at the current depth. Empty text yields an empty line.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// `header` then `{`, and indent.
    pub(crate) fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(header);
        self.open_brace()
    }

    /// A bare `{` for headers that span several lines.
    pub(crate) fn open_brace(&mut self) -> &mut Self {
        self.line("{");
        self.depth += 1;
        self
    }

    pub(crate) fn close(&mut self) -> &mut Self {
        self.close_with("}")
    }

    pub(crate) fn close_with(&mut self, closer: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(closer)
    }

    /// Run `body` one level deeper without emitting braces.
    pub(crate) fn indented(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self
    }

    /// `using` directives followed by a blank line.
    pub(crate) fn usings<I, S>(&mut self, namespaces: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for ns in namespaces {
            self.line(format!("using {};", ns.as_ref()));
        }
        self.blank()
    }

    /// File-scoped namespace declaration followed by a blank line.
    pub(crate) fn namespace(&mut self, ns: impl AsRef<str>) -> &mut Self {
        self.line(format!("namespace {};", ns.as_ref()));
        self.blank()
    }

    /// `#region name` ... `#endregion`.
    pub(crate) fn region(&mut self, name: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(format!("#region {name}"));
        self.blank();
        body(self);
        self.blank();
        self.line("#endregion")
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
