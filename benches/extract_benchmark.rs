//! Benchmarks for doctables extraction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic document bodies, so no fixtures are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use doctables::extract::{clean_text, AnnotationClassifier};
use doctables::parser::parse_body_xml;
use doctables::{Block, ExtractionResult, Paragraph, Table, TableCell, TableExtractor, TableRow, TextRun};

/// Builds `word/document.xml` with the given number of sections, each with one table.
fn create_body_xml(sections: usize, rows: usize) -> String {
    let mut xml = String::from(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for s in 0..sections {
        xml.push_str(&format!("<w:p><w:r><w:t>SECTION {}</w:t></w:r></w:p>", s));
        xml.push_str("<w:tbl>");
        for r in 0..rows {
            xml.push_str("<w:tr>");
            xml.push_str(&format!("<w:tc><w:p><w:r><w:t>Country {}</w:t></w:r></w:p></w:tc>", r));
            xml.push_str(&format!(
                concat!(
                    "<w:tc><w:p><w:r><w:rPr><w:sz w:val=\"24\"/></w:rPr><w:t>{},200</w:t></w:r>",
                    "<w:r><w:rPr><w:vertAlign w:val=\"superscript\"/><w:sz w:val=\"16\"/></w:rPr><w:t>{}</w:t></w:r></w:p></w:tc>"
                ),
                r,
                r % 9 + 1
            ));
            xml.push_str("<w:tc><w:p><w:r><w:t>CO₂</w:t></w:r></w:p></w:tc>");
            xml.push_str("</w:tr>");
        }
        xml.push_str("</w:tbl>");
    }

    xml.push_str("</w:body></w:document>");
    xml
}

/// Benchmark classification of a typical annotated cell.
fn bench_classification(c: &mut Criterion) {
    let classifier = AnnotationClassifier::default();
    let runs = vec![
        TextRun::new("1,200").with_size(24.0),
        TextRun::new(" ").with_size(24.0),
        TextRun::new("3").with_size(14.0),
    ];

    c.bench_function("classify_size_heuristic", |b| {
        b.iter(|| classifier.classify(black_box(&runs)));
    });

    c.bench_function("clean_text", |b| {
        b.iter(|| clean_text(black_box("  1,200\n(estimated)\t ")));
    });
}

/// Benchmark body parsing at various sizes.
fn bench_body_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_parsing");

    for sections in [1, 10, 50].iter() {
        let xml = create_body_xml(*sections, 20);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| parse_body_xml(black_box(xml.as_bytes())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark extraction over an already parsed block sequence.
fn bench_extraction(c: &mut Criterion) {
    let mut blocks = Vec::new();
    for s in 0..20 {
        blocks.push(Block::Paragraph(Paragraph::with_text(format!("SECTION {}", s))));
        let mut table = Table::new();
        for r in 0..50 {
            table.add_row(TableRow::new(vec![
                TableCell::text(format!("Row {}", r)),
                TableCell::with_runs(vec![TextRun::new("510"), TextRun::superscript("2")]),
                TableCell::text("N/A"),
            ]));
        }
        blocks.push(Block::Table(table));
    }
    let extractor = TableExtractor::new();

    c.bench_function("extract_blocks_20x50", |b| {
        b.iter(|| -> ExtractionResult { extractor.extract_blocks(black_box(&blocks)) });
    });
}

criterion_group!(
    benches,
    bench_classification,
    bench_body_parsing,
    bench_extraction,
);
criterion_main!(benches);
