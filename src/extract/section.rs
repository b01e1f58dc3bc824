//! Section segmentation: pairing tables with the heading that precedes them.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{Block, Table};

/// Heading-like text: uppercase letter first, then uppercase letters,
/// digits, whitespace, parentheses, slashes and hyphens.
fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][A-Z\s()/\-0-9]*$").expect("valid heading pattern"))
}

/// Check whether a paragraph's text looks like a section heading.
///
/// All-caps labels such as `COBALT` or `RARE EARTHS (REO)` qualify; mixed-case
/// text and labels of two characters or fewer do not.
pub fn is_heading(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().count() > 2 && heading_pattern().is_match(text)
}

/// A table paired with the heading in effect when it appeared.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedTable<'a> {
    /// Most recent heading, if any preceded the table
    pub heading: Option<String>,
    /// Number of headings that appeared before the table
    pub headings_before: usize,
    /// The table block
    pub table: &'a Table,
}

/// Result of segmenting a block sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation<'a> {
    /// Every heading in document order, whether or not tables follow it
    pub headings: Vec<String>,
    /// Tables with their heading, in document order
    pub tables: Vec<SegmentedTable<'a>>,
}

/// Heading cursor and output carried through the block fold.
#[derive(Debug, Default)]
struct SegmentState<'a> {
    current: Option<String>,
    output: Segmentation<'a>,
}

/// Walk blocks in order, assigning each table to the latest heading.
pub fn segment(blocks: &[Block]) -> Segmentation<'_> {
    let state = blocks
        .iter()
        .fold(SegmentState::default(), |mut state, block| {
            match block {
                Block::Paragraph(paragraph) => {
                    let text = paragraph.plain_text();
                    if is_heading(&text) {
                        let label = text.trim().to_string();
                        state.output.headings.push(label.clone());
                        state.current = Some(label);
                    }
                }
                Block::Table(table) => state.output.tables.push(SegmentedTable {
                    heading: state.current.clone(),
                    headings_before: state.output.headings.len(),
                    table,
                }),
            }
            state
        });

    log::debug!(
        "Segmented {} tables under {} headings",
        state.output.tables.len(),
        state.output.headings.len()
    );
    state.output
}
