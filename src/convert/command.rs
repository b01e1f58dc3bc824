//! Converter backed by an external command.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::PdfConverter;
use crate::error::{Error, Result};

/// Argument placeholder replaced by the PDF path.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Argument placeholder replaced by the DOCX path.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Runs `program args...` with `{input}` and `{output}` substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Create a converter from a program and argument template.
    pub fn new<S: Into<String>>(program: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `pdf2docx convert {input} {output}`.
    pub fn pdf2docx() -> Self {
        Self::new("pdf2docx", ["convert", INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER])
    }

    /// Parse a whitespace-separated command line such as
    /// `"pdf2docx convert {input} {output}"`.
    ///
    /// When no placeholder appears, `{input} {output}` are appended.
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::ConversionUnavailable("empty converter command".into()))?;
        let mut args: Vec<String> = parts.map(str::to_string).collect();

        let has_placeholder = args
            .iter()
            .any(|a| a.contains(INPUT_PLACEHOLDER) || a.contains(OUTPUT_PLACEHOLDER));
        if !has_placeholder {
            args.push(INPUT_PLACEHOLDER.into());
            args.push(OUTPUT_PLACEHOLDER.into());
        }

        Ok(Self::new(program, args))
    }

    /// The program invoked.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with the placeholders filled in.
    pub fn arguments(&self, pdf: &Path, docx: &Path) -> Vec<String> {
        let input = pdf.to_string_lossy();
        let output = docx.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

impl Default for CommandConverter {
    fn default() -> Self {
        Self::pdf2docx()
    }
}

impl PdfConverter for CommandConverter {
    fn name(&self) -> &str {
        &self.program
    }

    fn convert(&self, pdf: &Path, docx: &Path) -> Result<PathBuf> {
        if !pdf.is_file() {
            return Err(Error::InputNotFound(pdf.to_path_buf()));
        }

        let args = self.arguments(pdf, docx);
        log::info!("Converting {} -> {}", pdf.display(), docx.display());
        log::debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::ConversionUnavailable(format!(
                    "converter '{}' not found on PATH",
                    self.program
                )),
                _ => Error::ConversionFailed(format!("failed to run '{}': {}", self.program, e)),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ConversionFailed(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        if !docx.is_file() {
            return Err(Error::ConversionFailed(format!(
                "'{}' produced no output at {}",
                self.program,
                docx.display()
            )));
        }

        Ok(docx.to_path_buf())
    }
}
