//! File-name glob patterns for batch input selection.

use regex::Regex;

use crate::error::{Error, Result};

/// Default batch pattern.
pub const DEFAULT_PATTERN: &str = "*.pdf";

/// A glob over file names: `*` matches any run of characters, `?` one
/// character, everything else itself. Matching is case-sensitive and
/// covers the whole name.
#[derive(Debug, Clone)]
pub struct FilePattern {
    glob: String,
    regex: Regex,
}

impl FilePattern {
    /// Compile a glob.
    pub fn new(glob: &str) -> Result<Self> {
        if glob.is_empty() {
            return Err(Error::InvalidPattern("empty pattern".into()));
        }
        if glob.contains(|c: char| c == '/' || c == '\\') {
            return Err(Error::InvalidPattern(format!(
                "{}: patterns match file names, not paths",
                glob
            )));
        }

        let mut source = String::with_capacity(glob.len() * 2 + 2);
        source.push('^');
        for c in glob.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                c => source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        let regex = Regex::new(&source)
            .map_err(|e| Error::InvalidPattern(format!("{}: {}", glob, e)))?;
        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// The glob as written.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Check whether a file name matches.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN).expect("default pattern compiles")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star() {
        let p = FilePattern::new("*.pdf").unwrap();
        assert!(p.matches("report.pdf"));
        assert!(p.matches(".pdf"));
        assert!(!p.matches("report.PDF"));
        assert!(!p.matches("report.pdf.bak"));
        assert!(!p.matches("report.docx"));
    }

    #[test]
    fn test_question_mark_and_literals() {
        let p = FilePattern::new("mcs202?.docx").unwrap();
        assert!(p.matches("mcs2023.docx"));
        assert!(!p.matches("mcs20234.docx"));
        assert!(!p.matches("mcs2023xdocx"));

        let p = FilePattern::new("a+b (1).pdf").unwrap();
        assert!(p.matches("a+b (1).pdf"));
        assert!(!p.matches("aab (1).pdf"));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(FilePattern::new(""), Err(Error::InvalidPattern(_))));
        assert!(matches!(
            FilePattern::new("sub/*.pdf"),
            Err(Error::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_default() {
        assert_eq!(FilePattern::default().as_str(), "*.pdf");
    }
}
