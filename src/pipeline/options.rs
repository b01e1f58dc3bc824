//! Pipeline options.

use crate::extract::ExtractOptions;

/// Options for single-file and batch processing.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Keep the DOCX produced from a PDF input
    pub keep_intermediate: bool,

    /// Batch worker count; 1 processes files sequentially
    pub jobs: usize,

    /// Write a JSON sidecar next to each workbook
    pub write_json: bool,

    /// Extraction options
    pub extract: ExtractOptions,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or delete intermediate DOCX files.
    pub fn keep_intermediate(mut self, keep: bool) -> Self {
        self.keep_intermediate = keep;
        self
    }

    /// Set the batch worker count. Zero is treated as one.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Enable or disable the JSON sidecar.
    pub fn with_json(mut self, write: bool) -> Self {
        self.write_json = write;
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            keep_intermediate: false,
            jobs: 1,
            write_json: false,
            extract: ExtractOptions::default(),
        }
    }
}
