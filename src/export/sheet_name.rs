//! Worksheet naming rules.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// Longest worksheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Name used when nothing legal is left of a requested name.
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

/// Suffix attempts before a name is declared exhausted.
const MAX_SUFFIX_ATTEMPTS: usize = 10_000;

const ILLEGAL_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Sheet name spreadsheet applications keep for themselves.
const RESERVED_SHEET_NAME: &str = "history";

/// Make a string usable as a worksheet name.
///
/// Strips `[ ] : * ? / \`, trims whitespace and leading or trailing
/// apostrophes, keeps the first 31 characters and falls back to `"Sheet"`
/// when the result is empty.
pub fn clean_sheet_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect();
    let trimmed = stripped.trim_matches(|c: char| c == '\'' || c.is_whitespace());
    let truncated: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    let truncated = truncated.trim_end_matches('\'').to_string();

    if truncated.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        truncated
    }
}

/// Join a stem and a suffix into a legal sheet name, keeping the suffix.
///
/// The stem is cleaned and shortened as needed so the suffix always
/// survives the length limit.
pub fn compose(stem: &str, suffix: &str) -> String {
    let suffix: String = suffix.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect();
    let room = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());

    let stem: String = stem.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect();
    let stem: String = stem.trim().chars().take(room).collect();

    clean_sheet_name(&format!("{}{}", stem.trim_end(), suffix))
}

/// Hands out unique sheet names within one workbook.
///
/// Names compare case-insensitively. A taken name gets a `_2`, `_3`, ...
/// suffix. `History` is taken from the start.
#[derive(Debug)]
pub struct SheetNamer {
    used: HashSet<String>,
    handed_out: usize,
}

impl Default for SheetNamer {
    fn default() -> Self {
        Self {
            used: HashSet::from([RESERVED_SHEET_NAME.to_string()]),
            handed_out: 0,
        }
    }
}

impl SheetNamer {
    /// Create a namer with no names handed out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a unique name derived from `requested`.
    pub fn claim(&mut self, requested: &str) -> Result<String> {
        let base = clean_sheet_name(requested);
        if self.used.insert(base.to_lowercase()) {
            self.handed_out += 1;
            return Ok(base);
        }

        for n in 2..=MAX_SUFFIX_ATTEMPTS {
            let candidate = compose(&base, &format!("_{}", n));
            if self.used.insert(candidate.to_lowercase()) {
                self.handed_out += 1;
                log::debug!("Sheet name {:?} taken, using {:?}", base, candidate);
                return Ok(candidate);
            }
        }

        Err(Error::ExportWriteFailed(format!(
            "no unique sheet name available for {:?}",
            requested
        )))
    }

    /// Number of names handed out.
    pub fn len(&self) -> usize {
        self.handed_out
    }

    /// Check if no name has been handed out.
    pub fn is_empty(&self) -> bool {
        self.handed_out == 0
    }
}
