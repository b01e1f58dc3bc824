//! # doctables
//!
//! Table extraction from DOCX reports into annotated spreadsheets.
//!
//! Every table in a document is read cell by cell and grouped under the
//! all-caps heading that precedes it. Cells carrying superscript or
//! subscript digits (footnote markers, chemical formulas) are flagged
//! without altering their text, and each table is written to an XLSX
//! workbook as a text sheet plus two 0/1 flag sheets.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doctables::{export_workbook, extract_tables};
//!
//! fn main() -> doctables::Result<()> {
//!     let result = extract_tables("report.docx")?;
//!     for (label, tables) in result.iter() {
//!         println!("{}: {} tables", label, tables.len());
//!     }
//!
//!     export_workbook(&result, "report_tables.xlsx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Annotation flags**: Unicode digits, explicit `vertAlign` and a relative font-size heuristic
//! - **Section grouping**: tables follow the most recent heading-like paragraph
//! - **XLSX export**: collision-safe sheet names, atomic writes
//! - **PDF input**: through a pluggable external converter
//! - **Batch processing**: glob selection and parallel workers via Rayon

pub mod convert;
pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use convert::{CommandConverter, PdfConverter};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, InputFormat};
pub use error::{Error, Result};
pub use export::{clean_sheet_name, CellValue, Sheet, Workbook};
pub use extract::{
    classify, clean_text, is_heading, Annotation, AnnotationClassifier, ExtractOptions,
    TableExtractor,
};
pub use model::{
    Block, CellRecord, Document, ExtractionResult, Paragraph, Section, Table, TableCell,
    TableGrid, TableRow, TextRun, UNSECTIONED,
};
pub use parser::DocxParser;
pub use pipeline::{BatchEvent, BatchSummary, FileReport, Pipeline, PipelineOptions};
pub use render::JsonFormat;

use std::path::Path;
use std::sync::Arc;

/// Extract every table of a DOCX file, grouped by section.
///
/// # Example
///
/// ```no_run
/// use doctables::extract_tables;
///
/// let result = extract_tables("report.docx").unwrap();
/// println!("Tables: {}", result.table_count());
/// ```
pub fn extract_tables<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    TableExtractor::new().extract(path)
}

/// Extract tables with custom options.
///
/// # Example
///
/// ```no_run
/// use doctables::{extract_tables_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().raw();
/// let result = extract_tables_with_options("report.docx", options).unwrap();
/// ```
pub fn extract_tables_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionResult> {
    TableExtractor::with_options(options).extract(path)
}

/// Extract tables from DOCX bytes.
pub fn extract_tables_from_bytes(data: &[u8]) -> Result<ExtractionResult> {
    let document = DocxParser::from_bytes(data)?.parse()?;
    Ok(TableExtractor::new().extract_document(&document))
}

/// Write an extraction result to an XLSX workbook.
pub fn export_workbook<P: AsRef<Path>>(result: &ExtractionResult, path: P) -> Result<Workbook> {
    export::export(result, path)
}

/// Convert a result to JSON.
///
/// # Example
///
/// ```no_run
/// use doctables::{extract_tables, to_json, JsonFormat};
///
/// let result = extract_tables("report.docx").unwrap();
/// let json = to_json(&result, JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn to_json(result: &ExtractionResult, format: JsonFormat) -> Result<String> {
    render::to_json(result, format)
}

/// Process one DOCX or PDF into a workbook with default settings.
///
/// PDFs go through `pdf2docx`, which must be on `PATH`.
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<FileReport> {
    Pipeline::new()
        .with_converter(Arc::new(CommandConverter::pdf2docx()))
        .process_file(input, output)
}

/// Process every matching file of a directory with default settings.
pub fn batch_process<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    pattern: &str,
) -> Result<BatchSummary> {
    Pipeline::new()
        .with_converter(Arc::new(CommandConverter::pdf2docx()))
        .batch_process(input_dir, output_dir, pattern)
}
