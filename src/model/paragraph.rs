//! Paragraph and text-run types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in document order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with a single plain run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Create a paragraph from runs.
    pub fn with_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Add a run to the paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.is_blank())
    }
}

/// A run of text with consistent formatting.
///
/// The formatting fields are `None` when the source did not state them
/// explicitly on the run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Explicit superscript property
    pub superscript: Option<bool>,

    /// Explicit subscript property
    pub subscript: Option<bool>,

    /// Font size in source units (DOCX half-points). Only compared relatively.
    pub font_size: Option<f32>,
}

impl TextRun {
    /// Create a new text run without explicit formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Create a run explicitly marked as superscript.
    pub fn superscript(text: impl Into<String>) -> Self {
        Self::new(text).with_vertical(Some(true), Some(false))
    }

    /// Create a run explicitly marked as subscript.
    pub fn subscript(text: impl Into<String>) -> Self {
        Self::new(text).with_vertical(Some(false), Some(true))
    }

    /// Set the explicit vertical alignment flags and return self.
    pub fn with_vertical(mut self, superscript: Option<bool>, subscript: Option<bool>) -> Self {
        self.superscript = superscript;
        self.subscript = subscript;
        self
    }

    /// Set the font size and return self.
    pub fn with_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Whether the run has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether the run contains at least one ASCII digit.
    pub fn has_digit(&self) -> bool {
        self.text.bytes().any(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text() {
        let mut p = Paragraph::with_text("12");
        p.add_run(TextRun::superscript("3"));
        assert_eq!(p.plain_text(), "123");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_blank_paragraph() {
        let p = Paragraph::with_runs(vec![TextRun::new("  "), TextRun::new("\t")]);
        assert!(p.is_empty());
        assert!(Paragraph::new().is_empty());
    }

    #[test]
    fn test_run_helpers() {
        let run = TextRun::subscript("2").with_size(16.0);
        assert_eq!(run.subscript, Some(true));
        assert_eq!(run.superscript, Some(false));
        assert_eq!(run.font_size, Some(16.0));
        assert!(run.has_digit());
        assert!(!TextRun::new("²").has_digit());
    }
}
