//! DOCX parsing module.

mod docx_parser;

pub use docx_parser::{parse_body_xml, DocxParser};
