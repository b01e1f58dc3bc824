//! Superscript/subscript annotation detection for table cells.
//!
//! A cell is flagged from three independent signals:
//!
//! 1. Unicode superscript/subscript digits in the cell text.
//! 2. Explicit `vertAlign` formatting on a run that contains an ASCII digit.
//! 3. For superscript only: a digit run set noticeably smaller than the
//!    cell's median font size. Only consulted when 1 and 2 found nothing.
//!
//! Flags are metadata; the cell text is never modified here.

use serde::{Deserialize, Serialize};

use super::options::DEFAULT_SMALL_FONT_RATIO;
use crate::model::TextRun;

/// Annotation flags for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Raised digit annotation present
    pub superscript: bool,
    /// Lowered digit annotation present
    pub subscript: bool,
}

/// Decides superscript/subscript presence from a cell's runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationClassifier {
    small_font_ratio: f32,
}

impl AnnotationClassifier {
    /// Create a classifier with the given font-size ratio.
    pub fn new(small_font_ratio: f32) -> Self {
        Self { small_font_ratio }
    }

    /// The font-size ratio in use.
    pub fn small_font_ratio(&self) -> f32 {
        self.small_font_ratio
    }

    /// Classify a cell from its runs in reading order.
    pub fn classify<'a, I>(&self, runs: I) -> Annotation
    where
        I: IntoIterator<Item = &'a TextRun>,
    {
        let runs: Vec<&TextRun> = runs.into_iter().filter(|r| !r.is_blank()).collect();
        if runs.is_empty() {
            return Annotation::default();
        }

        let text: String = runs.iter().map(|r| r.text.as_str()).collect();

        let superscript = text.chars().any(is_superscript_digit)
            || runs
                .iter()
                .any(|r| r.has_digit() && r.superscript == Some(true))
            || self.has_small_digit_run(&runs);

        let subscript = text.chars().any(is_subscript_digit)
            || runs
                .iter()
                .any(|r| r.has_digit() && r.subscript == Some(true));

        Annotation {
            superscript,
            subscript,
        }
    }

    /// Size heuristic: any digit run strictly below `ratio × median` size.
    fn has_small_digit_run(&self, runs: &[&TextRun]) -> bool {
        let sizes: Vec<f32> = runs.iter().filter_map(|r| r.font_size).collect();
        let Some(median) = median(&sizes) else {
            return false;
        };
        let threshold = f64::from(self.small_font_ratio) * median;

        runs.iter().any(|r| {
            r.has_digit()
                && r.font_size
                    .map(|size| f64::from(size) < threshold)
                    .unwrap_or(false)
        })
    }
}

impl Default for AnnotationClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SMALL_FONT_RATIO)
    }
}

/// Classify runs with the default font-size ratio.
pub fn classify<'a, I>(runs: I) -> Annotation
where
    I: IntoIterator<Item = &'a TextRun>,
{
    AnnotationClassifier::default().classify(runs)
}

/// ¹ ² ³ and U+2070–U+2079.
pub fn is_superscript_digit(c: char) -> bool {
    matches!(c, '\u{00B9}' | '\u{00B2}' | '\u{00B3}' | '\u{2070}'..='\u{2079}')
}

/// U+2080–U+2089.
pub fn is_subscript_digit(c: char) -> bool {
    matches!(c, '\u{2080}'..='\u{2089}')
}

/// Median of the values; mean of the two middle values for even counts.
pub(crate) fn median(values: &[f32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        Some(f64::from(sorted[mid]))
    } else {
        Some((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    }
}
