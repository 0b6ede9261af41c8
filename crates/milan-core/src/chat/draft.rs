//! Draft input buffer owned by the presentation layer.

/// Maximum height of the input area, in rows.
pub const MAX_DRAFT_ROWS: usize = 3;

/// Text the user is composing but has not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    text: String,
}

impl DraftInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Shift+Enter: start a new line instead of submitting.
    pub fn insert_newline(&mut self) {
        self.text.push('\n');
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the text out, leaving the draft empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn is_multiline(&self) -> bool {
        self.text.contains('\n')
    }

    /// Display height when soft-wrapped at `width` columns, clamped to
    /// `1..=MAX_DRAFT_ROWS`.
    pub fn rows(&self, width: usize) -> usize {
        let width = width.max(1);
        let wrapped: usize = self
            .text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum();
        wrapped.clamp(1, MAX_DRAFT_ROWS)
    }
}
