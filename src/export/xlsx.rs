//! XLSX package writer.
//!
//! Emits a minimal SpreadsheetML package: workbook, relationships, styles,
//! a shared-strings table and one worksheet part per sheet. The archive is
//! assembled in a temporary file beside the target and renamed into place
//! only once complete.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::workbook::{CellValue, Workbook};
use crate::error::{Error, Result};

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIP_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Style index of header cells in `styles.xml`.
const HEADER_STYLE: usize = 1;

/// Longest text a cell may hold.
pub(crate) const MAX_CELL_TEXT_LEN: usize = 32_767;

/// Escape XML special characters and drop characters XML 1.0 forbids.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// 1-based column number to letters: 1 → A, 27 → AA.
pub(crate) fn column_letters(col: usize) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        letters.insert(0, (b'A' + (col % 26) as u8) as char);
        col /= 26;
    }

    letters
}

/// Cut `s` to the cell text limit, on a character boundary.
fn cap_cell_text(s: &str) -> &str {
    match s.char_indices().nth(MAX_CELL_TEXT_LEN) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Shared strings table.
#[derive(Debug, Default)]
struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, usize>,
    references: usize,
}

impl SharedStrings {
    fn add(&mut self, s: &str) -> usize {
        let capped = cap_cell_text(s);
        if capped.len() < s.len() {
            log::warn!(
                "Cell text of {} characters cut to {}",
                s.chars().count(),
                MAX_CELL_TEXT_LEN
            );
        }
        let s = capped;

        self.references += 1;
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.strings.len();
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), i);
        i
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(64 + self.strings.len() * 32);
        xml.push_str(XML_DECL);
        let _ = write!(
            xml,
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            SPREADSHEET_NS,
            self.references,
            self.strings.len()
        );
        for s in &self.strings {
            let _ = write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s));
        }
        xml.push_str("</sst>");
        xml
    }
}

/// Write a workbook to `path`, replacing any existing file.
///
/// Parent directories are created. On failure no file is left at `path`
/// and an existing file there is untouched.
pub fn write_workbook(workbook: &Workbook, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| write_failed(path, e))?;

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_failed(path, e))?;
    write_package(workbook, temp.as_file_mut())?;
    temp.as_file().sync_all().map_err(|e| write_failed(path, e))?;
    temp.persist(path).map_err(|e| write_failed(path, e.error))?;

    log::info!(
        "Wrote {} sheets to {}",
        workbook.len(),
        path.display()
    );
    Ok(())
}

/// Serialize a workbook into an in-memory XLSX package.
pub fn workbook_to_bytes(workbook: &Workbook) -> Result<Vec<u8>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    write_package(workbook, &mut cursor)?;
    Ok(cursor.into_inner())
}

fn write_failed(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::ExportWriteFailed(format!("{}: {}", path.display(), e))
}

fn write_package<W: Write + Seek>(workbook: &Workbook, writer: W) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut strings = SharedStrings::default();

    let sheets: Vec<String> = workbook
        .sheets
        .iter()
        .map(|sheet| sheet_xml(&sheet.rows, &mut strings))
        .collect();

    let mut parts: Vec<(String, String)> = vec![
        ("[Content_Types].xml".into(), content_types_xml(sheets.len())),
        ("_rels/.rels".into(), root_rels_xml()),
        ("xl/workbook.xml".into(), workbook_xml(workbook)),
        (
            "xl/_rels/workbook.xml.rels".into(),
            workbook_rels_xml(sheets.len()),
        ),
        ("xl/styles.xml".into(), styles_xml()),
        ("xl/sharedStrings.xml".into(), strings.to_xml()),
    ];
    parts.extend(
        sheets
            .into_iter()
            .enumerate()
            .map(|(i, xml)| (format!("xl/worksheets/sheet{}.xml", i + 1), xml)),
    );

    for (name, xml) in parts {
        zip.start_file(name.as_str(), options)
            .map_err(|e| Error::ExportWriteFailed(e.to_string()))?;
        zip.write_all(xml.as_bytes())
            .map_err(|e| Error::ExportWriteFailed(e.to_string()))?;
    }
    zip.finish()
        .map_err(|e| Error::ExportWriteFailed(e.to_string()))?;
    Ok(())
}

fn sheet_xml(rows: &[Vec<CellValue>], strings: &mut SharedStrings) -> String {
    let mut xml = String::with_capacity(256 + rows.len() * 64);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<worksheet xmlns="{}">"#, SPREADSHEET_NS);
    xml.push_str("<sheetData>");

    for (r, row) in rows.iter().enumerate() {
        let row_num = r + 1;
        let _ = write!(xml, r#"<row r="{}">"#, row_num);
        for (c, value) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letters(c + 1), row_num);
            let style = if r == 0 {
                format!(r#" s="{}""#, HEADER_STYLE)
            } else {
                String::new()
            };
            match value {
                CellValue::Text(text) => {
                    let idx = strings.add(text);
                    let _ = write!(
                        xml,
                        r#"<c r="{}"{} t="s"><v>{}</v></c>"#,
                        cell_ref, style, idx
                    );
                }
                CellValue::Number(n) => {
                    let _ = write!(xml, r#"<c r="{}"{}><v>{}</v></c>"#, cell_ref, style, n);
                }
                CellValue::Empty => {}
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::with_capacity(1024 + sheet_count * 160);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    for i in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i
        );
    }
    xml.push_str(r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

fn root_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
        XML_DECL, PACKAGE_REL_NS, RELATIONSHIP_NS
    )
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut xml = String::with_capacity(512 + workbook.len() * 64);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        r#"<workbook xmlns="{}" xmlns:r="{}"><sheets>"#,
        SPREADSHEET_NS, RELATIONSHIP_NS
    );
    for (i, sheet) in workbook.sheets.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(&sheet.name),
            i + 1,
            i + 1
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = String::with_capacity(512 + sheet_count * 160);
    xml.push_str(XML_DECL);
    let _ = write!(xml, r#"<Relationships xmlns="{}">"#, PACKAGE_REL_NS);
    for i in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i, RELATIONSHIP_NS, i
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{}/styles" Target="styles.xml"/>"#,
        sheet_count + 1,
        RELATIONSHIP_NS
    );
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="{}/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheet_count + 2,
        RELATIONSHIP_NS
    );
    xml.push_str("</Relationships>");
    xml
}

fn styles_xml() -> String {
    format!(
        concat!(
            "{}<styleSheet xmlns=\"{}\">",
            "<fonts count=\"2\">",
            "<font><sz val=\"11\"/><name val=\"Calibri\"/></font>",
            "<font><b/><sz val=\"11\"/><name val=\"Calibri\"/></font>",
            "</fonts>",
            "<fills count=\"2\"><fill><patternFill patternType=\"none\"/></fill>",
            "<fill><patternFill patternType=\"gray125\"/></fill></fills>",
            "<borders count=\"1\"><border><left/><right/><top/><bottom/><diagonal/></border></borders>",
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
            "<cellXfs count=\"2\">",
            "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>",
            "<xf numFmtId=\"0\" fontId=\"1\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyFont=\"1\"/>",
            "</cellXfs>",
            "<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>",
            "</styleSheet>"
        ),
        XML_DECL, SPREADSHEET_NS
    )
}
