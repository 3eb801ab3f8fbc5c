//! Public and internal types for the pdfsearch API and pipeline.

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Absolute, canonical path of one input document. Used as the report key.
pub type DocumentPath = PathBuf;

/// Raw extracted text of one page. Page numbers start at 1.
#[derive(Clone, Debug)]
pub struct PageRecord {
    pub document: DocumentPath,
    pub page_number: usize,
    pub text: String,
}

/// Lines of one page that contain the search term, in page order. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageMatch {
    pub document: DocumentPath,
    pub page_number: usize,
    pub matched_lines: Vec<String>,
}

/// All matched pages of one document, accumulated by the aggregator in arrival order.
#[derive(Clone, Debug, Default)]
pub struct DocumentMatches {
    pub pages: HashMap<usize, Vec<String>>,
}

/// One matched page in the final report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub page: usize,
    pub lines: Vec<String>,
}

/// One matched document in the final report; `pages` ascending by page number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub path: DocumentPath,
    pub pages: Vec<ReportPage>,
}

/// Final, sorted search result. Documents are ordered by path; only documents with at least
/// one matched page are present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub documents: Vec<ReportDocument>,
}

impl Report {
    /// Build a report from finalized groups: documents by path, pages ascending.
    pub fn from_groups(groups: HashMap<DocumentPath, DocumentMatches>) -> Self {
        let mut documents: Vec<ReportDocument> = groups
            .into_iter()
            .filter(|(_, group)| !group.pages.is_empty())
            .map(|(path, group)| {
                let mut pages: Vec<ReportPage> = group
                    .pages
                    .into_iter()
                    .map(|(page, lines)| ReportPage { page, lines })
                    .collect();
                pages.sort_unstable_by_key(|p| p.page);
                ReportDocument { path, pages }
            })
            .collect();
        // Byte order of the whole path, not component-wise `Path` order: `a-b.pdf` < `a/x.pdf`.
        documents.sort_unstable_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        Report { documents }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Total matched pages across all documents.
    pub fn matched_pages(&self) -> usize {
        self.documents.iter().map(|d| d.pages.len()).sum()
    }
}

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Lib-only options for [`search_dir`](crate::search_dir).
#[derive(Clone, Debug, Default)]
pub struct SearchOpts {
    /// Conversion worker count. When None, derived from available parallelism and the FD limit.
    pub conversion_threads: Option<usize>,
    /// Search worker count. When None, available parallelism.
    pub search_threads: Option<usize>,
    /// Capacity of each bounded queue. When None, [`ChannelCap::DEFAULT`](crate::utils::config::ChannelCap::DEFAULT).
    pub channel_cap: Option<usize>,
    /// Converter program. When None, `pdftotext`.
    pub converter: Option<String>,
    /// Document extension without the dot. When None, `pdf`.
    pub extension: Option<String>,
    /// Match lines ignoring case.
    pub case_insensitive: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl From<&SearchOpts> for Opts {
    fn from(o: &SearchOpts) -> Self {
        let defaults = Opts::default();
        Opts {
            conversion_threads: o.conversion_threads,
            search_threads: o.search_threads,
            channel_cap: o.channel_cap,
            converter: o.converter.clone().unwrap_or(defaults.converter),
            extension: o.extension.clone().unwrap_or(defaults.extension),
            case_insensitive: o.case_insensitive,
            recursive: o.recursive,
            ..defaults
        }
    }
}

/// Full options (CLI). Use [`SearchOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Conversion worker count override.
    pub conversion_threads: Option<usize>,
    /// Search worker count override.
    pub search_threads: Option<usize>,
    /// Bounded queue capacity override.
    pub channel_cap: Option<usize>,
    /// External converter program, invoked as `<converter> <path> -`.
    pub converter: String,
    /// Recognized document extension (case-insensitive, no leading dot).
    pub extension: String,
    /// Match lines ignoring case.
    pub case_insensitive: bool,
    /// Descend into subdirectories of the target directory.
    pub recursive: bool,
    /// Report format on stdout.
    pub format: OutputFormat,
    /// Debug logging and per-document failure listing.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Opts {
            conversion_threads: None,
            search_threads: None,
            channel_cap: None,
            converter: crate::utils::config::DEFAULT_CONVERTER.to_string(),
            extension: crate::utils::config::DEFAULT_EXTENSION.to_string(),
            case_insensitive: false,
            recursive: false,
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}
