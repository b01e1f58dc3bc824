//! Table extraction engine: document body to section-grouped grids.

use std::path::Path;

use chrono::Utc;

use super::classify::AnnotationClassifier;
use super::clean::clean_text;
use super::options::ExtractOptions;
use super::section::segment;
use crate::error::{Error, Result};
use crate::model::{
    Block, CellRecord, Document, ExtractionMetadata, ExtractionResult, Table, TableCell,
    TableGrid, UNSECTIONED,
};
use crate::parser::DocxParser;

/// Extracts tables from DOCX documents, grouped by section heading.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    options: ExtractOptions,
}

impl TableExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every table of a DOCX file.
    ///
    /// Fails with [`Error::InputNotFound`] when `path` is not an existing file
    /// and [`Error::MalformedDocument`] when it cannot be parsed.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InputNotFound(path.to_path_buf()));
        }

        log::info!("Extracting from: {}", path.display());
        let document = DocxParser::open(path)?.parse()?;
        let mut result = self.extract_document(&document);
        result.metadata = ExtractionMetadata {
            source: Some(path.display().to_string()),
            extracted_at: Some(Utc::now()),
        };

        log::info!(
            "Extracted {} tables from {} sections",
            result.table_count(),
            result.section_count()
        );
        Ok(result)
    }

    /// Extract tables from an already parsed document.
    pub fn extract_document(&self, document: &Document) -> ExtractionResult {
        self.extract_blocks(&document.blocks)
    }

    /// Extract tables from a block sequence.
    ///
    /// Every heading opens a section, even if no table follows it. Tables
    /// that precede the first heading land in [`UNSECTIONED`], which is only
    /// created when such a table exists.
    pub fn extract_blocks(&self, blocks: &[Block]) -> ExtractionResult {
        let segmentation = segment(blocks);
        let classifier = AnnotationClassifier::new(self.options.small_font_ratio);

        let mut result = ExtractionResult::new();
        let mut opened = 0;

        for pair in &segmentation.tables {
            for heading in &segmentation.headings[opened..pair.headings_before] {
                result.section_mut(heading);
            }
            opened = pair.headings_before;

            let label = pair.heading.as_deref().unwrap_or(UNSECTIONED);
            let grid = self.extract_table(pair.table, &classifier);
            result.section_mut(label).tables.push(grid);
        }
        for heading in &segmentation.headings[opened..] {
            result.section_mut(heading);
        }

        result
    }

    fn extract_table(&self, table: &Table, classifier: &AnnotationClassifier) -> TableGrid {
        let mut grid = TableGrid::new();
        for row in &table.rows {
            grid.push_row(
                row.cells
                    .iter()
                    .map(|cell| self.extract_cell(cell, classifier))
                    .collect(),
            );
        }
        grid
    }

    fn extract_cell(&self, cell: &TableCell, classifier: &AnnotationClassifier) -> CellRecord {
        let annotation = classifier.classify(cell.runs());
        let text = cell.plain_text();
        let text = if self.options.clean_data {
            clean_text(&text)
        } else {
            text
        };
        CellRecord::new(text, annotation.superscript, annotation.subscript)
    }
}
