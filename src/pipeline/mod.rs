//! File pipeline: conversion, extraction and export for files and directories.
//!
//! # Example
//!
//! ```no_run
//! use doctables::convert::CommandConverter;
//! use doctables::pipeline::{Pipeline, PipelineOptions};
//! use std::sync::Arc;
//!
//! fn main() -> doctables::Result<()> {
//!     let pipeline = Pipeline::new()
//!         .with_converter(Arc::new(CommandConverter::pdf2docx()))
//!         .with_options(PipelineOptions::new().with_jobs(4));
//!
//!     let summary = pipeline.batch_process("reports", "out", "*.pdf")?;
//!     println!("{} ok, {} failed", summary.succeeded, summary.failed);
//!     Ok(())
//! }
//! ```

mod options;
mod pattern;
mod report;

pub use options::PipelineOptions;
pub use pattern::{FilePattern, DEFAULT_PATTERN};
pub use report::{BatchEvent, BatchFailure, BatchSummary, FileReport};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Sender;
use rayon::prelude::*;
use tempfile::TempDir;

use crate::convert::{intermediate_path, PdfConverter};
use crate::detect::InputFormat;
use crate::error::{Error, Result};
use crate::export;
use crate::extract::TableExtractor;
use crate::render;

/// Suffix appended to the input stem for batch outputs.
pub const OUTPUT_SUFFIX: &str = "_tables.xlsx";

/// Workbook name for an input in batch mode: `report.pdf` → `report_tables.xlsx`.
pub fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

/// Drives conversion, extraction and export.
#[derive(Clone, Default)]
pub struct Pipeline {
    converter: Option<Arc<dyn PdfConverter>>,
    options: PipelineOptions,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("converter", &self.converter.as_ref().map(|c| c.name()))
            .field("options", &self.options)
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline with no converter and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the converter used for PDF inputs.
    pub fn with_converter(mut self, converter: Arc<dyn PdfConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Set pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in use.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Process one DOCX or PDF file into a workbook at `output`.
    ///
    /// A PDF is converted to `<stem>.docx` beside it first. That intermediate
    /// is deleted afterwards, whether or not extraction succeeded, unless
    /// `keep_intermediate` is set. An existing file at that path is never
    /// touched: the conversion goes to a scratch directory instead, or fails
    /// when the intermediate was asked to be kept.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<FileReport> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.is_file() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }

        match InputFormat::from_extension(input) {
            InputFormat::Docx => self.extract_and_export(input, input, output, false),
            InputFormat::Pdf => {
                let converter = self.converter.as_ref().ok_or_else(|| {
                    Error::ConversionUnavailable(format!(
                        "{} is a PDF and no converter is configured",
                        input.display()
                    ))
                })?;

                let (docx, scratch) = self.intermediate_target(input)?;
                let outcome = converter
                    .convert(input, &docx)
                    .and_then(|docx| self.extract_and_export(input, &docx, output, true));

                // A scratch directory cleans up after itself on drop.
                if scratch.is_none() && !self.options.keep_intermediate {
                    remove_intermediate(&docx);
                }
                outcome
            }
        }
    }

    /// Process every file in `input_dir` whose name matches `pattern`.
    pub fn batch_process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
        pattern: &str,
    ) -> Result<BatchSummary> {
        self.batch_process_with_progress(input_dir, output_dir, pattern, None)
    }

    /// Like [`batch_process`](Self::batch_process), reporting progress on
    /// `progress` as files start, finish and fail.
    ///
    /// Individual failures are logged and recorded; they never stop the
    /// batch. Only a missing input directory, an unusable output directory
    /// or a bad pattern fail the call itself.
    pub fn batch_process_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
        pattern: &str,
        progress: Option<&Sender<BatchEvent>>,
    ) -> Result<BatchSummary> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();

        if !input_dir.is_dir() {
            return Err(Error::InputNotFound(input_dir.to_path_buf()));
        }
        let pattern = FilePattern::new(pattern)?;
        fs::create_dir_all(output_dir)?;

        let files = matching_files(input_dir, &pattern)?;
        log::info!(
            "Found {} files matching {} in {}",
            files.len(),
            pattern.as_str(),
            input_dir.display()
        );
        notify(progress, BatchEvent::Queued { total: files.len() });

        let run = |(index, path): (usize, &PathBuf)| {
            notify(
                progress,
                BatchEvent::Started {
                    index,
                    path: path.clone(),
                },
            );
            let output = output_dir.join(output_file_name(path));
            let outcome = self.process_file(path, &output);
            match &outcome {
                Ok(report) => notify(
                    progress,
                    BatchEvent::Finished {
                        index,
                        report: report.clone(),
                    },
                ),
                Err(e) => {
                    log::error!("Error processing {}: {}", path.display(), e);
                    notify(
                        progress,
                        BatchEvent::Failed {
                            index,
                            path: path.clone(),
                            error: e.to_string(),
                        },
                    );
                }
            }
            outcome
        };

        let outcomes: Vec<Result<FileReport>> = if self.options.jobs <= 1 {
            files.iter().enumerate().map(run).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.jobs)
                .build()
                .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))?;
            pool.install(|| files.par_iter().enumerate().map(run).collect())
        };

        let summary = summarize(&files, outcomes);
        log::info!(
            "Batch done: {} succeeded, {} failed",
            summary.succeeded,
            summary.failed
        );
        Ok(summary)
    }

    /// Where to convert `pdf`, plus the scratch directory owning that path
    /// when the usual spot beside the PDF is already taken.
    fn intermediate_target(&self, pdf: &Path) -> Result<(PathBuf, Option<TempDir>)> {
        let beside = intermediate_path(pdf);
        if !beside.exists() {
            return Ok((beside, None));
        }

        if self.options.keep_intermediate {
            return Err(Error::ConversionFailed(format!(
                "intermediate {} already exists",
                beside.display()
            )));
        }

        let scratch = tempfile::tempdir()?;
        let name = beside
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("intermediate.docx"));
        let docx = scratch.path().join(name);
        log::debug!(
            "{} exists, converting {} into {}",
            beside.display(),
            pdf.display(),
            docx.display()
        );
        Ok((docx, Some(scratch)))
    }

    fn extract_and_export(
        &self,
        input: &Path,
        docx: &Path,
        output: &Path,
        converted: bool,
    ) -> Result<FileReport> {
        let extractor = TableExtractor::with_options(self.options.extract.clone());
        let result = extractor.extract(docx)?;
        let workbook = export::export(&result, output)?;

        let json = if self.options.write_json {
            Some(render::write_sidecar(&result, output)?)
        } else {
            None
        };

        Ok(FileReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            converted,
            sections: result.section_count(),
            tables: result.table_count(),
            sheets: workbook.len(),
            json,
        })
    }
}

/// Regular files in `dir` whose names match, sorted by name.
fn matching_files(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if pattern.matches(name) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn summarize(files: &[PathBuf], outcomes: Vec<Result<FileReport>>) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for (path, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(report) => {
                summary.succeeded += 1;
                summary.reports.push(report);
            }
            Err(e) => {
                summary.failed += 1;
                summary.failures.push(BatchFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }
    summary
}

fn notify(progress: Option<&Sender<BatchEvent>>, event: BatchEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is watching.
        let _ = tx.send(event);
    }
}

fn remove_intermediate(docx: &Path) {
    if !docx.exists() {
        return;
    }
    match fs::remove_file(docx) {
        Ok(()) => log::debug!("Removed intermediate {}", docx.display()),
        Err(e) => log::warn!(
            "Could not remove intermediate {}: {}",
            docx.display(),
            e
        ),
    }
}
