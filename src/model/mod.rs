//! Document model types.
//!
//! The input side ([`Document`], [`Block`], [`Table`], [`TextRun`]) is what the
//! DOCX parser produces; the output side ([`ExtractionResult`], [`TableGrid`],
//! [`CellRecord`]) is what the extraction engine hands to the exporters.

mod document;
mod extraction;
mod paragraph;
mod table;

pub use document::{Block, Document};
pub use extraction::{
    CellRecord, ExtractionMetadata, ExtractionResult, Section, TableGrid, UNSECTIONED,
};
pub use paragraph::{Paragraph, TextRun};
pub use table::{Table, TableCell, TableRow};
