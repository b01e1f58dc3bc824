//! PDF to DOCX conversion collaborators.
//!
//! Extraction works on DOCX packages only. PDFs are handed to a
//! [`PdfConverter`] first; the bundled [`CommandConverter`] shells out to an
//! external tool (`pdf2docx` by default).
//!
//! # Example
//!
//! ```no_run
//! use doctables::convert::{CommandConverter, PdfConverter};
//! use std::path::Path;
//!
//! fn main() -> doctables::Result<()> {
//!     let converter = CommandConverter::pdf2docx();
//!     let docx = converter.convert(Path::new("report.pdf"), Path::new("report.docx"))?;
//!     println!("{}", docx.display());
//!     Ok(())
//! }
//! ```

mod command;

pub use command::{CommandConverter, INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Trait for PDF to DOCX converters.
///
/// Implementations report a missing backing tool as
/// [`Error::ConversionUnavailable`](crate::Error::ConversionUnavailable) and
/// any other failure as
/// [`Error::ConversionFailed`](crate::Error::ConversionFailed).
pub trait PdfConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert `pdf` into a DOCX written at `docx`, returning the DOCX path.
    fn convert(&self, pdf: &Path, docx: &Path) -> Result<PathBuf>;
}

/// Where the converted DOCX for a PDF goes: beside it, same stem.
pub fn intermediate_path(pdf: &Path) -> PathBuf {
    pdf.with_extension("docx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediate_path() {
        assert_eq!(
            intermediate_path(Path::new("in/report.PDF")),
            PathBuf::from("in/report.docx")
        );
        assert_eq!(
            intermediate_path(Path::new("a.b.pdf")),
            PathBuf::from("a.b.docx")
        );
    }
}
