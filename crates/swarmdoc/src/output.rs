//! Colored progress and report output on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Terminal reporter for generation and freshness results.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
    heading: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    fn line(&self, text: impl Display) {
        // Write errors are ignored.
        let _ = self.term.write_line(&text.to_string());
    }

    /// Plain progress line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(self.ok.apply_to(msg));
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(self.warn.apply_to(msg));
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(self.fail.apply_to(msg));
    }

    /// Numbered step header, e.g. `[1/2] Docs pages:`.
    pub(crate) fn step(&self, index: usize, total: usize, label: &str) {
        self.line(self.heading.apply_to(format!("\n[{index}/{total}] {label} pages:")));
    }

    /// A page written to the published corpus.
    pub(crate) fn generated(&self, path: &str) {
        self.success(&format!("  OK: {path}"));
    }

    /// A source that could not be read.
    pub(crate) fn skipped(&self, source: &str) {
        self.warning(&format!("  SKIP: {source} (not found)"));
    }

    /// Failure heading followed by one bullet per path. Prints nothing for
    /// an empty list.
    pub(crate) fn path_list(&self, heading: &str, paths: &[String]) {
        if paths.is_empty() {
            return;
        }
        self.error(heading);
        for path in paths {
            self.line(format_args!("  - {path}"));
        }
    }
}
