//! In-memory workbook built from an extraction result.

use serde::{Deserialize, Serialize};

use super::sheet_name::{compose, SheetNamer, FALLBACK_SHEET_NAME};
use crate::error::Result;
use crate::model::{ExtractionResult, TableGrid};

/// Suffix of the superscript flag sheet.
pub const SUPERSCRIPT_SUFFIX: &str = "_SUP";

/// Suffix of the subscript flag sheet.
pub const SUBSCRIPT_SUFFIX: &str = "_SUB";

/// A scalar worksheet value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    /// Text, stored as a shared string
    Text(String),
    /// Integer
    Number(i64),
    /// No value
    #[default]
    Empty,
}

impl CellValue {
    /// Text value, or [`CellValue::Empty`] for an empty string.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    /// 0/1 value of a flag.
    pub fn flag(set: bool) -> Self {
        Self::Number(i64::from(set))
    }

    /// Check if the value is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A named worksheet. The first row is the header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Unique name within the workbook
    pub name: String,
    /// Rectangular rows of values
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Create a sheet from rows, padding short rows to the widest one.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

/// Ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in tab order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out an extraction result as sheets.
    ///
    /// Table `i` of section `S` yields `S_i` (text), `S_i_SUP` and `S_i_SUB`
    /// (flags as 0/1). Sections without tables produce no sheets. An empty
    /// result yields one empty sheet so the package stays valid.
    pub fn from_extraction(result: &ExtractionResult) -> Result<Self> {
        let mut namer = SheetNamer::new();
        let mut workbook = Self::new();

        for (label, tables) in result.iter() {
            for (index, grid) in tables.iter().enumerate() {
                let base = namer.claim(&format!("{}_{}", label, index))?;
                let sup = namer.claim(&compose(&base, SUPERSCRIPT_SUFFIX))?;
                let sub = namer.claim(&compose(&base, SUBSCRIPT_SUFFIX))?;

                workbook.push(Sheet::from_rows(base, text_rows(grid)));
                workbook.push(Sheet::from_rows(
                    sup,
                    flag_rows(grid.superscript_grid()),
                ));
                workbook.push(Sheet::from_rows(sub, flag_rows(grid.subscript_grid())));
            }
        }

        if workbook.is_empty() {
            workbook.push(Sheet::new(FALLBACK_SHEET_NAME));
        }
        Ok(workbook)
    }

    /// Append a sheet.
    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Get a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

fn text_rows(grid: &TableGrid) -> Vec<Vec<CellValue>> {
    grid.rows
        .iter()
        .map(|row| row.iter().map(|c| CellValue::text(c.text.as_str())).collect())
        .collect()
}

fn flag_rows(flags: Vec<Vec<bool>>) -> Vec<Vec<CellValue>> {
    flags
        .into_iter()
        .map(|row| row.into_iter().map(CellValue::flag).collect())
        .collect()
}
