//! Integration tests for the file pipeline.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::*;
use doctables::pipeline::{BatchEvent, Pipeline, PipelineOptions};
use doctables::{Error, PdfConverter, Result};

/// Stands in for an external tool: "converts" by copying a prepared DOCX.
struct CopyConverter {
    docx: Vec<u8>,
}

impl PdfConverter for CopyConverter {
    fn name(&self) -> &str {
        "copy"
    }

    fn convert(&self, _pdf: &Path, docx: &Path) -> Result<PathBuf> {
        fs::write(docx, &self.docx)?;
        Ok(docx.to_path_buf())
    }
}

fn sample_body(marker: &str) -> Vec<String> {
    vec![para("COBALT"), table(&[&["Country", marker], &["Chile", "1"]])]
}

fn copy_pipeline() -> Pipeline {
    Pipeline::new().with_converter(Arc::new(CopyConverter {
        docx: docx_bytes(&sample_body("2022")),
    }))
}

#[test]
fn test_process_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.docx");
    write_docx(&input, &sample_body("2022"));
    let output = dir.path().join("out").join("report_tables.xlsx");

    let pipeline = Pipeline::new().with_options(PipelineOptions::new().with_json(true));
    let report = pipeline.process_file(&input, &output).unwrap();

    assert!(!report.converted);
    assert_eq!(report.tables, 1);
    assert_eq!(report.sheets, 3);
    assert!(output.is_file());
    assert_eq!(report.json, Some(dir.path().join("out").join("report_tables.json")));
    assert!(input.is_file());
}

#[test]
fn test_process_pdf_removes_intermediate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    fs::write(&input, b"%PDF-1.7").unwrap();
    let output = dir.path().join("report_tables.xlsx");

    let report = copy_pipeline().process_file(&input, &output).unwrap();

    assert!(report.converted);
    assert!(output.is_file());
    assert!(!dir.path().join("report.docx").exists());
}

#[test]
fn test_process_pdf_keeps_intermediate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    fs::write(&input, b"%PDF-1.7").unwrap();

    let pipeline = copy_pipeline().with_options(PipelineOptions::new().keep_intermediate(true));
    pipeline
        .process_file(&input, dir.path().join("report_tables.xlsx"))
        .unwrap();

    assert!(dir.path().join("report.docx").is_file());
}

#[test]
fn test_process_pdf_beside_existing_docx() {
    let dir = tempfile::tempdir().unwrap();
    let own = dir.path().join("report.docx");
    let own_bytes = docx_bytes(&sample_body("mine"));
    fs::write(&own, &own_bytes).unwrap();
    let input = dir.path().join("report.pdf");
    fs::write(&input, b"%PDF-1.7").unwrap();

    let report = copy_pipeline()
        .process_file(&input, dir.path().join("out.xlsx"))
        .unwrap();

    assert!(report.converted);
    assert_eq!(report.tables, 1);
    assert_eq!(fs::read(&own).unwrap(), own_bytes);
}

#[test]
fn test_keep_intermediate_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let own = dir.path().join("report.docx");
    fs::write(&own, b"mine").unwrap();
    let input = dir.path().join("report.pdf");
    fs::write(&input, b"%PDF-1.7").unwrap();

    let pipeline = copy_pipeline().with_options(PipelineOptions::new().keep_intermediate(true));
    let result = pipeline.process_file(&input, dir.path().join("out.xlsx"));

    assert!(matches!(result, Err(Error::ConversionFailed(_))));
    assert_eq!(fs::read(&own).unwrap(), b"mine");
    assert!(!dir.path().join("out.xlsx").exists());
}

#[test]
fn test_batch_keeps_docx_sharing_a_pdf_stem() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let own = input.path().join("report.docx");
    write_docx(&own, &sample_body("mine"));
    let own_bytes = fs::read(&own).unwrap();
    fs::write(input.path().join("report.pdf"), b"%PDF-1.7").unwrap();

    let summary = copy_pipeline()
        .batch_process(input.path(), output.path(), "report.*")
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(fs::read(&own).unwrap(), own_bytes);
}

#[test]
fn test_batch_continues_past_failures() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    write_docx(&input.path().join("a.docx"), &sample_body("A"));
    fs::write(input.path().join("b.docx"), b"garbage, not a package").unwrap();
    write_docx(&input.path().join("c.docx"), &sample_body("C"));
    fs::write(input.path().join("notes.txt"), b"ignored").unwrap();

    let summary = Pipeline::new()
        .batch_process(input.path(), output.path(), "*.docx")
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].path, input.path().join("b.docx"));
    assert!(output.path().join("a_tables.xlsx").is_file());
    assert!(!output.path().join("b_tables.xlsx").exists());
    assert!(output.path().join("c_tables.xlsx").is_file());
}

#[test]
fn test_parallel_batch_reports_in_input_order() {
    let input = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let output = scratch.path().join("nested");

    for name in ["d", "a", "c", "b", "e"] {
        write_docx(&input.path().join(format!("{}.docx", name)), &sample_body(name));
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    let pipeline = Pipeline::new().with_options(PipelineOptions::new().with_jobs(3));
    let summary = pipeline
        .batch_process_with_progress(input.path(), &output, "?.docx", Some(&tx))
        .unwrap();
    drop(tx);

    assert_eq!(summary.succeeded, 5);
    let order: Vec<_> = summary
        .reports
        .iter()
        .map(|r| r.input.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(order, vec!["a.docx", "b.docx", "c.docx", "d.docx", "e.docx"]);

    let events: Vec<BatchEvent> = rx.iter().collect();
    assert_eq!(events[0], BatchEvent::Queued { total: 5 });
    let finished = events
        .iter()
        .filter(|e| matches!(e, BatchEvent::Finished { .. }))
        .count();
    assert_eq!(finished, 5);
}

#[test]
fn test_parallel_batch_isolates_failures() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    for name in ["a", "b", "d", "e"] {
        write_docx(&input.path().join(format!("{}.docx", name)), &sample_body(name));
    }
    fs::write(input.path().join("c.docx"), b"garbage, not a package").unwrap();

    let pipeline = Pipeline::new().with_options(PipelineOptions::new().with_jobs(3));
    let summary = pipeline
        .batch_process(input.path(), output.path(), "*.docx")
        .unwrap();

    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].path, input.path().join("c.docx"));
    for name in ["a", "b", "d", "e"] {
        assert!(output.path().join(format!("{}_tables.xlsx", name)).is_file());
    }
    assert!(!output.path().join("c_tables.xlsx").exists());
}

#[test]
fn test_batch_pdf_without_converter() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("x.pdf"), b"%PDF-1.7").unwrap();

    let summary = Pipeline::new()
        .batch_process(input.path(), output.path(), "*.pdf")
        .unwrap();
    assert_eq!(summary.failed, 1);
    assert!(summary.failures[0].error.contains("no converter"));
}

#[test]
fn test_batch_missing_directory() {
    let result = Pipeline::new().batch_process("/no/such/dir", "/tmp/doctables-out", "*.pdf");
    assert!(matches!(result, Err(Error::InputNotFound(_))));
}
