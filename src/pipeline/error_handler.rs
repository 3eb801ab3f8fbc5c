use std::path::PathBuf;

use crate::Opts;
use crate::pipeline::PipelineSummary;

/// Log documents that failed conversion and entries discovery skipped. Never an error:
/// both are soft failures. Paths are listed individually only when verbose.
pub fn report_failed_documents(opts: &Opts, summary: &PipelineSummary) {
    log_soft_failures(
        opts,
        &summary.failed_documents,
        "documents could not be converted and were skipped",
    );
    log_soft_failures(
        opts,
        &summary.skipped_entries,
        "entries could not be read during discovery",
    );
}

fn log_soft_failures(opts: &Opts, items: &[(PathBuf, String)], what: &str) {
    if items.is_empty() {
        return;
    }
    log::warn!("{} {}", items.len(), what);
    if opts.verbose {
        for (path, reason) in items {
            eprintln!("  skipped: {} ({})", path.display(), reason);
        }
    }
}
