//! Extraction output: cell records, table grids and sections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label of the pseudo-section holding tables that precede every heading.
pub const UNSECTIONED: &str = "UNSECTIONED";

/// One extracted cell: visible text plus annotation flags.
///
/// The flags never alter `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Cell text (cleaned if cleaning was enabled)
    pub text: String,

    /// Superscript digit annotation detected
    pub superscript: bool,

    /// Subscript digit annotation detected
    pub subscript: bool,
}

impl CellRecord {
    /// Create a record.
    pub fn new(text: impl Into<String>, superscript: bool, subscript: bool) -> Self {
        Self {
            text: text.into(),
            superscript,
            subscript,
        }
    }

    /// Create a record without annotations.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false, false)
    }
}

/// Rows of cell records. Rows may differ in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Rows in source order
    pub rows: Vec<Vec<CellRecord>>,
}

impl TableGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<CellRecord>) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn max_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text view of the grid.
    pub fn text_grid(&self) -> Vec<Vec<&str>> {
        self.project(|c| c.text.as_str())
    }

    /// Superscript flag view of the grid.
    pub fn superscript_grid(&self) -> Vec<Vec<bool>> {
        self.project(|c| c.superscript)
    }

    /// Subscript flag view of the grid.
    pub fn subscript_grid(&self) -> Vec<Vec<bool>> {
        self.project(|c| c.subscript)
    }

    /// Number of cells flagged superscript.
    pub fn superscript_count(&self) -> usize {
        self.cells().filter(|c| c.superscript).count()
    }

    /// Number of cells flagged subscript.
    pub fn subscript_count(&self) -> usize {
        self.cells().filter(|c| c.subscript).count()
    }

    fn cells(&self) -> impl Iterator<Item = &CellRecord> {
        self.rows.iter().flatten()
    }

    fn project<'a, T>(&'a self, f: impl Fn(&'a CellRecord) -> T) -> Vec<Vec<T>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(&f).collect())
            .collect()
    }
}

/// A heading label and the tables that follow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, or [`UNSECTIONED`]
    pub label: String,

    /// Tables in document order
    pub tables: Vec<TableGrid>,
}

impl Section {
    /// Create an empty section.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tables: Vec::new(),
        }
    }
}

/// Where and when an extraction was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Source document path
    pub source: Option<String>,

    /// Extraction timestamp
    pub extracted_at: Option<DateTime<Utc>>,
}

/// Section label to tables, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Provenance
    pub metadata: ExtractionMetadata,

    /// Sections in order of first appearance
    pub sections: Vec<Section>,
}

impl ExtractionResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a section by label.
    pub fn section(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }

    /// Section labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.label.as_str()).collect()
    }

    /// Get or create the section with `label`, appending new sections at the end.
    pub fn section_mut(&mut self, label: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.label == label) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(label));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Iterate over `(label, tables)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TableGrid])> {
        self.sections
            .iter()
            .map(|s| (s.label.as_str(), s.tables.as_slice()))
    }

    /// Total number of tables across all sections.
    pub fn table_count(&self) -> usize {
        self.sections.iter().map(|s| s.tables.len()).sum()
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if no table was extracted.
    pub fn is_empty(&self) -> bool {
        self.table_count() == 0
    }
}
