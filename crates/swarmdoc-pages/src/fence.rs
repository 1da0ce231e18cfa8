//! Code fence tracking for line-by-line processing.
//!
//! Tracks whether we're inside a fenced code block so that prose-only passes
//! (title extraction, escaping) leave code untouched.

/// Opening and closing marker of a fenced code block.
const FENCE_MARKER: &str = "```";

/// Tracks code fence state during line-by-line processing.
///
/// Any line whose left-trimmed content starts with three backticks toggles
/// the state. Fence lengths and info strings are not compared, so an
/// unbalanced fence simply leaves the rest of the document fenced.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    in_fence: bool,
}

impl FenceTracker {
    /// Create a new fence tracker.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.in_fence
    }

    /// Update fence state based on a line.
    ///
    /// Returns `true` if the line is a fence marker (opening or closing).
    pub(crate) fn update(&mut self, line: &str) -> bool {
        if is_fence_line(line) {
            self.in_fence = !self.in_fence;
            return true;
        }
        false
    }
}

fn is_fence_line(line: &str) -> bool {
    line.trim_start().starts_with(FENCE_MARKER)
}
