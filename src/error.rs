//! Error types for doctables library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for doctables operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and exporting tables.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source file or directory does not exist.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A PDF was supplied but no converter is available to turn it into a DOCX.
    #[error("PDF conversion unavailable: {0}")]
    ConversionUnavailable(String),

    /// The PDF converter ran but did not produce a document.
    #[error("PDF conversion failed: {0}")]
    ConversionFailed(String),

    /// The document package or its XML could not be parsed.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The workbook could not be written.
    #[error("Export failed: {0}")]
    ExportWriteFailed(String),

    /// The batch file pattern could not be compiled.
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::MalformedDocument(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedDocument(format!("XML error: {}", err))
    }
}

impl Error {
    /// Whether this error concerns a missing input rather than a failed step.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::InputNotFound(_))
    }
}
