//! Spreadsheet export of extraction results.
//!
//! Every table becomes three worksheets: the cell text, then the
//! superscript and subscript flags as 0/1 grids of the same shape.
//!
//! # Example
//!
//! ```no_run
//! use doctables::export::export;
//! use doctables::TableExtractor;
//!
//! fn main() -> doctables::Result<()> {
//!     let result = TableExtractor::new().extract("report.docx")?;
//!     export(&result, "out/report_tables.xlsx")?;
//!     Ok(())
//! }
//! ```

mod sheet_name;
mod workbook;
mod xlsx;

pub use sheet_name::{
    clean_sheet_name, compose, SheetNamer, FALLBACK_SHEET_NAME, MAX_SHEET_NAME_LEN,
};
pub use workbook::{CellValue, Sheet, Workbook, SUBSCRIPT_SUFFIX, SUPERSCRIPT_SUFFIX};
pub use xlsx::{workbook_to_bytes, write_workbook};

use std::path::Path;

use crate::error::Result;
use crate::model::ExtractionResult;

/// Write an extraction result to an XLSX workbook at `path`.
///
/// Any existing file at `path` is replaced; parent directories are created.
pub fn export<P: AsRef<Path>>(result: &ExtractionResult, path: P) -> Result<Workbook> {
    let workbook = Workbook::from_extraction(result)?;
    write_workbook(&workbook, path.as_ref())?;
    Ok(workbook)
}
