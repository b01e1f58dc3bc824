//! DOCX body parser using quick-xml over the zip package.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::{detect_format_from_path, InputFormat};
use crate::error::{Error, Result};
use crate::model::{Block, Document, Paragraph, Table, TableCell, TableRow, TextRun};

/// Package part holding the main document body.
const DOCUMENT_PART: &str = "word/document.xml";

/// Largest uncompressed body part accepted.
const MAX_DOCUMENT_PART_SIZE: u64 = 256 * 1024 * 1024;

/// DOCX document parser.
pub struct DocxParser {
    xml: Vec<u8>,
    source: Option<PathBuf>,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if detect_format_from_path(path)? == InputFormat::Pdf {
            return Err(Error::MalformedDocument(format!(
                "{} is a PDF; convert it to DOCX first",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let xml = read_document_part(BufReader::new(file))?;
        log::debug!("Read {} bytes of body XML from {}", xml.len(), path.display());

        Ok(Self {
            xml,
            source: Some(path.to_path_buf()),
        })
    }

    /// Open a DOCX package held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Open a DOCX package from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Ok(Self {
            xml: read_document_part(reader)?,
            source: None,
        })
    }

    /// Parse the body into a block sequence.
    pub fn parse(&self) -> Result<Document> {
        let blocks = parse_body_xml(&self.xml)?;
        Ok(Document {
            source: self.source.clone(),
            blocks,
        })
    }
}

fn read_document_part<R: Read + Seek>(reader: R) -> Result<Vec<u8>> {
    read_part(reader, DOCUMENT_PART, MAX_DOCUMENT_PART_SIZE)
}

/// Read one package part, refusing anything larger than `limit` bytes.
///
/// The size stored in the zip headers is only checked against the limit,
/// never used to size a buffer, and the read itself is bounded as well.
fn read_part<R: Read + Seek>(reader: R, name: &str, limit: u64) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(reader)?;
    let entry = archive.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => {
            Error::MalformedDocument(format!("package has no {}", name))
        }
        other => Error::from(other),
    })?;

    if entry.size() > limit {
        return Err(Error::MalformedDocument(format!(
            "{} declares {} bytes, limit is {}",
            name,
            entry.size(),
            limit
        )));
    }

    let mut data = Vec::new();
    entry
        .take(limit + 1)
        .read_to_end(&mut data)
        .map_err(|e| Error::MalformedDocument(format!("cannot read {}: {}", name, e)))?;

    if data.len() as u64 > limit {
        return Err(Error::MalformedDocument(format!(
            "{} exceeds {} bytes",
            name, limit
        )));
    }
    Ok(data)
}

/// Parse `word/document.xml` content into top-level blocks.
///
/// Tables nested inside a cell are flattened: their paragraphs become
/// paragraphs of the enclosing cell. Text-box content is skipped.
pub fn parse_body_xml(xml: &[u8]) -> Result<Vec<Block>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut builder = BodyBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => builder.start(&e, false),
            Event::Empty(e) => {
                builder.start(&e, true);
                builder.end(e.local_name().as_ref());
            }
            Event::End(e) => builder.end(e.local_name().as_ref()),
            Event::Text(e) => {
                if builder.in_text() {
                    let text = e.unescape()?;
                    builder.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if builder.table_depth != 0 {
        return Err(Error::MalformedDocument("unterminated table".to_string()));
    }

    log::debug!("Parsed {} top-level blocks", builder.blocks.len());
    Ok(builder.blocks)
}

/// Streaming state for the body walk.
#[derive(Default)]
struct BodyBuilder {
    blocks: Vec<Block>,
    table: Option<Table>,
    row: Option<TableRow>,
    cell: Option<TableCell>,
    paragraph: Option<Paragraph>,
    run: Option<TextRun>,
    table_depth: usize,
    skip_depth: usize,
    in_run_props: bool,
    in_text: bool,
}

impl BodyBuilder {
    fn in_text(&self) -> bool {
        self.in_text && self.skip_depth == 0
    }

    fn start(&mut self, e: &BytesStart<'_>, empty: bool) {
        let name = e.local_name();
        let name = name.as_ref();

        if name == b"txbxContent" {
            self.skip_depth += 1;
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"tbl" => {
                self.table_depth += 1;
                if self.table_depth == 1 {
                    self.table = Some(Table::new());
                }
            }
            b"tr" if self.table_depth == 1 => self.row = Some(TableRow::default()),
            b"tc" if self.table_depth == 1 => self.cell = Some(TableCell::empty()),
            b"p" => self.paragraph = Some(Paragraph::new()),
            b"r" if self.paragraph.is_some() => self.run = Some(TextRun::default()),
            b"rPr" if self.run.is_some() => self.in_run_props = !empty,
            b"vertAlign" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    let (sup, sub) = match attr_val(e).as_deref() {
                        Some("superscript") => (true, false),
                        Some("subscript") => (false, true),
                        _ => (false, false),
                    };
                    run.superscript = Some(sup);
                    run.subscript = Some(sub);
                }
            }
            b"sz" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    run.font_size = attr_val(e).and_then(|v| v.trim().parse::<f32>().ok());
                }
            }
            b"t" if self.run.is_some() && !self.in_run_props => self.in_text = !empty,
            b"tab" if self.run.is_some() && !self.in_run_props => self.push_text("\t"),
            b"br" | b"cr" if self.run.is_some() && !self.in_run_props => self.push_text("\n"),
            b"noBreakHyphen" if self.run.is_some() => self.push_text("-"),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        if name == b"txbxContent" {
            self.skip_depth = self.skip_depth.saturating_sub(1);
            return;
        }
        if self.skip_depth > 0 {
            return;
        }

        match name {
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.add_run(run);
                }
            }
            b"p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    self.finish_paragraph(paragraph);
                }
            }
            b"tc" if self.table_depth == 1 => {
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.cells.push(cell);
                }
            }
            b"tr" if self.table_depth == 1 => {
                if let (Some(row), Some(table)) = (self.row.take(), self.table.as_mut()) {
                    table.add_row(row);
                }
            }
            b"tbl" => {
                if self.table_depth == 1 {
                    if let Some(table) = self.table.take() {
                        self.blocks.push(Block::Table(table));
                    }
                }
                self.table_depth = self.table_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self, paragraph: Paragraph) {
        if self.table_depth == 0 {
            self.blocks.push(Block::Paragraph(paragraph));
        } else if let Some(cell) = self.cell.as_mut() {
            cell.paragraphs.push(paragraph);
        }
    }
}

/// Value of the `val` attribute (any namespace prefix).
fn attr_val(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"val")
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}
