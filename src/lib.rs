//! pdfsearch: search the page text of every PDF in a directory.
//!
//! Documents are converted to text by an external program, pages are searched in parallel,
//! and matches are reported grouped by document (by path) and page (ascending). The report
//! does not depend on worker counts or scheduling.

pub mod converter;
pub mod engine;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use std::path::Path;
use std::sync::Arc;

use crate::converter::{Converter, PdfToText};
use crate::pipeline::PipelineTuning;
use crate::utils::config::WorkerThreadLimits;

/// Result alias used by public pdfsearch API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Search every document in `root` for `term` using the configured converter program.
///
/// Fails only if `term` is empty or `root` cannot be listed. Documents that fail to convert
/// are left out of the report.
///
/// ```ignore
/// let opts = pdfsearch::SearchOpts { case_insensitive: true, ..Default::default() };
/// let report = pdfsearch::search_dir(Path::new("papers"), "transformer", &opts)?;
/// print!("{}", pdfsearch::report::render_text(&report));
/// ```
pub fn search_dir(root: &Path, term: &str, opts: &SearchOpts) -> Result<Report> {
    let program = Opts::from(opts).converter;
    search_dir_with(root, term, opts, Arc::new(PdfToText::new(program)))
}

/// Like [`search_dir`] with a caller-supplied [`Converter`].
pub fn search_dir_with(
    root: &Path,
    term: &str,
    opts: &SearchOpts,
    converter: Arc<dyn Converter>,
) -> Result<Report> {
    let opts = Opts::from(opts);
    let tuning = PipelineTuning::from_opts(&opts, WorkerThreadLimits::current());
    let (report, _summary) = pipeline::search_documents(root, term, &opts, tuning, converter)?;
    Ok(report)
}
