//! Per-file reports, batch summaries and progress events.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of processing one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    /// Input path as given
    pub input: PathBuf,
    /// Workbook written
    pub output: PathBuf,
    /// Whether the input was converted from PDF
    pub converted: bool,
    /// Sections found, including those without tables
    pub sections: usize,
    /// Tables extracted
    pub tables: usize,
    /// Worksheets written
    pub sheets: usize,
    /// JSON sidecar path, when written
    pub json: Option<PathBuf>,
}

/// A file that failed during a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Input path
    pub path: PathBuf,
    /// Error message
    pub error: String,
}

/// Aggregated batch outcome, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Files processed successfully
    pub succeeded: usize,
    /// Files that failed
    pub failed: usize,
    /// Failure details
    pub failures: Vec<BatchFailure>,
    /// Reports of the successful files
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    /// Total number of files attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Check if every file succeeded.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// Files matched; processing begins
    Queued {
        /// Number of matched files
        total: usize,
    },
    /// A file was picked up
    Started {
        /// Position in input order
        index: usize,
        /// Input path
        path: PathBuf,
    },
    /// A file completed
    Finished {
        /// Position in input order
        index: usize,
        /// Outcome
        report: FileReport,
    },
    /// A file failed
    Failed {
        /// Position in input order
        index: usize,
        /// Input path
        path: PathBuf,
        /// Error message
        error: String,
    },
}
