//! DOCX fixtures built in-test with the zip writer.

#![allow(dead_code)]

use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// A plain paragraph.
pub fn para(text: &str) -> String {
    format!("<w:p>{}</w:p>", run(text))
}

/// A plain run.
pub fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, text)
}

/// A run with `vertAlign` set.
pub fn aligned_run(text: &str, align: &str) -> String {
    format!(
        r#"<w:r><w:rPr><w:vertAlign w:val="{}"/></w:rPr><w:t>{}</w:t></w:r>"#,
        align, text
    )
}

/// A run with an explicit size in half-points.
pub fn sized_run(text: &str, half_points: u32) -> String {
    format!(
        r#"<w:r><w:rPr><w:sz w:val="{}"/></w:rPr><w:t>{}</w:t></w:r>"#,
        half_points, text
    )
}

/// A cell holding one paragraph made of the given runs.
pub fn cell(runs: &[String]) -> String {
    format!("<w:tc><w:p>{}</w:p></w:tc>", runs.concat())
}

/// A table from rows of ready-made cells.
pub fn table_of_cells(rows: &[Vec<String>]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| format!("<w:tr>{}</w:tr>", cells.concat()))
        .collect();
    format!("<w:tbl><w:tblPr/>{}</w:tbl>", rows)
}

/// A table of plain-text cells.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|cells| cells.iter().map(|t| cell(&[run(t)])).collect())
        .collect();
    table_of_cells(&rows)
}

/// Wrap body content into `word/document.xml`.
pub fn document_xml(body: &[String]) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}<w:sectPr/></w:body></w:document>"
        ),
        body.concat()
    )
}

/// DOCX package bytes for the given body content.
pub fn docx_bytes(body: &[String]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(RELS.as_bytes()).unwrap();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(document_xml(body).as_bytes()).unwrap();

    zip.finish().unwrap().into_inner()
}

/// Write a DOCX fixture to `path`.
pub fn write_docx(path: &Path, body: &[String]) {
    let mut file = File::create(path).unwrap();
    file.write_all(&docx_bytes(body)).unwrap();
}

/// Sheet names of an XLSX workbook, in tab order.
pub fn sheet_names(xlsx: &Path) -> Vec<String> {
    let workbook = read_part(xlsx, "xl/workbook.xml");
    workbook
        .split("<sheet ")
        .skip(1)
        .filter_map(|s| {
            let start = s.find("name=\"")? + 6;
            let end = start + s[start..].find('"')?;
            Some(s[start..end].to_string())
        })
        .collect()
}

/// Read one part of a zip package as text.
pub fn read_part(package: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(package).unwrap()).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}
