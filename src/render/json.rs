//! JSON rendering for extraction results.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Document, ExtractionResult};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an extraction result to JSON.
pub fn to_json(result: &ExtractionResult, format: JsonFormat) -> Result<String> {
    serialize(result, format)
}

/// Convert a parsed document body to JSON.
pub fn document_to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Path of the JSON sidecar for a workbook: `report_tables.xlsx` → `report_tables.json`.
pub fn sidecar_path(workbook: &Path) -> PathBuf {
    workbook.with_extension("json")
}

/// Write the JSON sidecar next to a workbook and return its path.
pub fn write_sidecar(result: &ExtractionResult, workbook: &Path) -> Result<PathBuf> {
    let path = sidecar_path(workbook);
    let json = to_json(result, JsonFormat::Pretty)?;
    fs::write(&path, json)?;
    log::debug!("Wrote JSON sidecar: {}", path.display());
    Ok(path)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
