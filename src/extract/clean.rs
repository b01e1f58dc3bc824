//! Minimal cell-text cleaning for spreadsheet export.

/// Tokens treated as missing values (compared case-insensitively).
const MISSING_TOKENS: [&str; 4] = ["NA", "N/A", "XX", "W"];

/// Clean a cell's text so it fits in a single spreadsheet cell.
///
/// Only shape-affecting changes are made: surrounding whitespace is trimmed,
/// missing-value tokens become empty, multi-line text keeps its first
/// non-empty line and tabs become spaces. Footnote markers, thousands
/// separators and other content pass through untouched.
pub fn clean_text(text: &str) -> String {
    let text = text.trim();

    if MISSING_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        return String::new();
    }

    let is_break = |c: char| c == '\n' || c == '\r';
    let text = if text.contains(is_break) {
        text.split(is_break)
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    } else {
        text
    };

    text.replace('\t', " ").trim().to_string()
}
