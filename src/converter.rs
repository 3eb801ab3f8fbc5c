//! Converter adapter: turn one document into its page texts via an external program.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Stdio};

use crate::utils::config::PAGE_SEPARATOR;

/// Extracts the text of a document, one string per page in page order.
///
/// Conversion workers call this concurrently from several threads. An `Err` or an empty
/// `Vec` both mean the document contributes no pages; neither aborts the run.
pub trait Converter: Send + Sync {
    fn pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Runs `<program> <path> -` and reads page text from stdout (poppler's `pdftotext` contract).
#[derive(Clone, Debug)]
pub struct PdfToText {
    program: String,
}

impl PdfToText {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Converter for PdfToText {
    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .arg(path)
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("run {} on {}", self.program, path.display()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr.lines().next().unwrap_or("").trim();
            bail!(
                "{} exited with {} for {}: {}",
                self.program,
                output.status,
                path.display(),
                reason
            );
        }
        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split converter output into pages on the form-feed separator.
///
/// The converter terminates every page with a separator, so the final segment is empty and
/// dropped. Empty output yields no pages.
pub fn split_pages(raw: &str) -> Vec<String> {
    let mut pages: Vec<String> = raw.split(PAGE_SEPARATOR).map(str::to_string).collect();
    if pages.last().is_some_and(|p| p.is_empty()) {
        pages.pop();
    }
    pages
}
