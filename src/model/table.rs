//! Table types.

use super::{Paragraph, TextRun};
use serde::{Deserialize, Serialize};

/// A table structure as read from the document body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table of plain-text cells.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(TableRow::from_strings).collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn max_columns(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether rows have differing cell counts.
    pub fn is_ragged(&self) -> bool {
        let mut widths = self.rows.iter().map(|r| r.cells.len());
        match widths.next() {
            Some(first) => widths.any(|w| w != first),
            None => false,
        }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content (paragraphs)
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::with_text(text)],
        }
    }

    /// Create a cell with a single paragraph made of the given runs.
    pub fn with_runs(runs: Vec<TextRun>) -> Self {
        Self {
            paragraphs: vec![Paragraph::with_runs(runs)],
        }
    }

    /// Create a cell with multiple paragraphs.
    pub fn with_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cell text: paragraphs joined by newlines, surrounding whitespace trimmed.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// All runs of the cell in reading order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.max_columns(), 0);
        assert!(!table.is_ragged());
    }

    #[test]
    fn test_ragged_table() {
        let table = Table::from_rows(vec![vec!["Country", "2021", "2022"], vec!["Chile"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.max_columns(), 3);
        assert!(table.is_ragged());
    }

    #[test]
    fn test_cell_text_joins_paragraphs() {
        let cell = TableCell::with_paragraphs(vec![
            Paragraph::with_text(" 1,200 "),
            Paragraph::with_text("(est.)"),
        ]);
        assert_eq!(cell.plain_text(), "1,200 \n(est.)");
        assert_eq!(cell.runs().count(), 2);
    }

    #[test]
    fn test_empty_cell() {
        assert!(TableCell::empty().is_empty());
        assert_eq!(TableCell::empty().plain_text(), "");
    }
}
