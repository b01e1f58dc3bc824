//! Input format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Kind of input document the pipeline can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Native word-processing document (Office Open XML package)
    Docx,
    /// PDF that must be converted before extraction
    Pdf,
}

impl InputFormat {
    /// File extension (without the dot) conventionally used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Docx => "docx",
            InputFormat::Pdf => "pdf",
        }
    }

    /// Resolve the format from a path's extension.
    ///
    /// Anything that is not `.pdf` (case-insensitive) is treated as a DOCX.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let is_pdf = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if is_pdf {
            InputFormat::Pdf
        } else {
            InputFormat::Docx
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Docx => write!(f, "DOCX"),
            InputFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Zip local file header, the container of every OOXML package.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect the input format from a file's leading bytes.
///
/// # Returns
/// * `Err(Error::InputNotFound)` if the file does not exist
/// * `Err(Error::MalformedDocument)` if the content is neither a zip package nor a PDF
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(8);
    reader.by_ref().take(8).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the first bytes of a file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        Ok(InputFormat::Pdf)
    } else if data.starts_with(ZIP_MAGIC) {
        Ok(InputFormat::Docx)
    } else {
        Err(Error::MalformedDocument(
            "not a zip package or PDF".to_string(),
        ))
    }
}

/// Check if a file looks like a PDF by content.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(InputFormat::Pdf))
}
