//! Report rendering for stdout.

use anyhow::{Context, Result};
use std::io::Write;

use crate::{OutputFormat, Report};

/// Write `report` in `format`. Documents with no matched pages never appear in a report.
pub fn write_report<W: Write>(out: &mut W, report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).context("serialize report")?;
            writeln!(out).context("write report")
        }
    }
}

/// `=== <path> (<K> matched pages)` per document, then `Page <N>: <line>` per matched line.
pub fn write_text<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    for document in &report.documents {
        writeln!(
            out,
            "=== {} ({} matched pages)",
            document.path.display(),
            document.pages.len()
        )
        .context("write report")?;
        for page in &document.pages {
            for line in &page.lines {
                writeln!(out, "Page {}: {}", page.page, line).context("write report")?;
            }
        }
    }
    Ok(())
}

/// Text rendering as a string.
pub fn render_text(report: &Report) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_text(&mut buf, report);
    String::from_utf8_lossy(&buf).into_owned()
}
