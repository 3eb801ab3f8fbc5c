//! End-to-end pipeline tests: discovery → conversion → search → aggregation over temp directories.

use anyhow::{Result, anyhow};
use pdfsearch::converter::{Converter, PdfToText};
use pdfsearch::pipeline::{PipelineTuning, search_documents};
use pdfsearch::report::render_text;
use pdfsearch::{Opts, Report, SearchOpts, search_dir_with};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

/// In-memory converter keyed by file name. Missing names fail like an unreadable document.
struct FakeConverter {
    pages: HashMap<String, Vec<String>>,
    /// Sleep per document, in ms, keyed by file name, to shuffle completion order.
    delays: HashMap<String, u64>,
}

impl FakeConverter {
    fn new(docs: &[(&str, &[&str])]) -> Self {
        let pages = docs
            .iter()
            .map(|(name, pages)| {
                (
                    name.to_string(),
                    pages.iter().map(|p| p.to_string()).collect(),
                )
            })
            .collect();
        Self {
            pages,
            delays: HashMap::new(),
        }
    }

    fn with_delay(mut self, name: &str, ms: u64) -> Self {
        self.delays.insert(name.to_string(), ms);
        self
    }
}

impl Converter for FakeConverter {
    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("no file name"))?;
        if let Some(ms) = self.delays.get(name) {
            std::thread::sleep(Duration::from_millis(*ms));
        }
        self.pages
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("cannot convert {}", name))
    }
}

fn touch_all(dir: &TempDir, names: &[&str]) {
    for name in names {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
}

fn doc_opts(extension: &str) -> Opts {
    Opts {
        extension: extension.to_string(),
        ..Opts::default()
    }
}

fn run(
    dir: &Path,
    term: &str,
    opts: &Opts,
    tuning: PipelineTuning,
    converter: Arc<dyn Converter>,
) -> Report {
    let (report, _) = search_documents(dir, term, opts, tuning, converter).unwrap();
    report
}

#[test]
fn test_end_to_end_example() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.doc", "b.doc"]);
    let converter = Arc::new(FakeConverter::new(&[
        ("a.doc", &["hello world", "foo bar\nhello again"]),
        ("b.doc", &["nothing here"]),
    ]));

    let report = run(
        dir.path(),
        "hello",
        &doc_opts("doc"),
        PipelineTuning::new(2, 2, 4),
        converter,
    );

    let a = dir.path().canonicalize().unwrap().join("a.doc");
    assert_eq!(
        render_text(&report),
        format!(
            "=== {} (2 matched pages)\nPage 1: hello world\nPage 2: hello again\n",
            a.display()
        )
    );
}

#[test]
fn test_absent_term_gives_empty_report() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.pdf", "b.pdf"]);
    let converter = Arc::new(FakeConverter::new(&[
        ("a.pdf", &["alpha", "beta"]),
        ("b.pdf", &["gamma"]),
    ]));
    let report = run(
        dir.path(),
        "zeta",
        &Opts::default(),
        PipelineTuning::new(1, 1, 1),
        converter,
    );
    assert!(report.is_empty());
}

#[test]
fn test_only_matching_extension_and_top_level_files() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.PDF", "notes.txt"]);
    std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();
    std::fs::write(dir.path().join("sub.pdf").join("c.pdf"), b"").unwrap();
    let converter = Arc::new(FakeConverter::new(&[
        ("a.PDF", &["term"]),
        ("notes.txt", &["term"]),
        ("c.pdf", &["term"]),
    ]));

    let report = run(
        dir.path(),
        "term",
        &Opts::default(),
        PipelineTuning::new(2, 2, 2),
        converter,
    );
    let names: Vec<_> = report
        .documents
        .iter()
        .map(|d| d.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.PDF"]);
}

#[test]
fn test_recursive_discovery_descends() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.pdf"]);
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::write(dir.path().join("nested").join("b.pdf"), b"").unwrap();
    let converter = Arc::new(FakeConverter::new(&[
        ("a.pdf", &["term here"]),
        ("b.pdf", &["term there"]),
    ]));
    let opts = Opts {
        recursive: true,
        ..Opts::default()
    };

    let report = run(dir.path(), "term", &opts, PipelineTuning::new(2, 2, 2), converter);
    let root = dir.path().canonicalize().unwrap();
    let paths: Vec<PathBuf> = report.documents.iter().map(|d| d.path.clone()).collect();
    assert_eq!(paths, vec![root.join("a.pdf"), root.join("nested").join("b.pdf")]);
}

#[test]
fn test_recursive_report_orders_full_paths_bytewise() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a-b.pdf"]);
    std::fs::create_dir(dir.path().join("a")).unwrap();
    std::fs::write(dir.path().join("a").join("x.pdf"), b"").unwrap();
    let converter = Arc::new(FakeConverter::new(&[
        ("x.pdf", &["term in subdir"]),
        ("a-b.pdf", &["term at top"]),
    ]));
    let opts = Opts {
        recursive: true,
        ..Opts::default()
    };

    let report = run(dir.path(), "term", &opts, PipelineTuning::new(2, 2, 2), converter);
    let root = dir.path().canonicalize().unwrap();
    let paths: Vec<PathBuf> = report.documents.iter().map(|d| d.path.clone()).collect();
    // '-' (0x2D) sorts before '/' (0x2F).
    assert_eq!(paths, vec![root.join("a-b.pdf"), root.join("a").join("x.pdf")]);
}

#[test]
fn test_failed_and_empty_documents_are_skipped() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["broken.pdf", "empty.pdf", "good.pdf"]);
    // broken.pdf is unknown to the converter and fails.
    let converter = Arc::new(FakeConverter::new(&[
        ("empty.pdf", &[]),
        ("good.pdf", &["no", "yes match"]),
    ]));

    let (report, summary) = search_documents(
        dir.path(),
        "match",
        &Opts::default(),
        PipelineTuning::new(3, 2, 1),
        converter,
    )
    .unwrap();

    assert_eq!(report.documents.len(), 1);
    assert!(report.documents[0].path.ends_with("good.pdf"));
    assert_eq!(report.documents[0].pages[0].page, 2);
    assert_eq!(summary.documents_discovered, 3);
    assert_eq!(summary.documents_converted, 2);
    assert_eq!(summary.pages_extracted, 2);
    assert_eq!(summary.pages_searched, 2);
    assert_eq!(summary.pages_matched, 1);
    assert_eq!(summary.failed_documents.len(), 1);
    assert!(summary.failed_documents[0].0.ends_with("broken.pdf"));
}

fn many_documents(dir: &TempDir) -> FakeConverter {
    let names: Vec<String> = (0..12).map(|i| format!("doc{:02}.pdf", i)).collect();
    let pages: Vec<Vec<String>> = (0..12)
        .map(|i| {
            (1..=15)
                .map(|p| {
                    if (i + p) % 3 == 0 {
                        format!("line a\nneedle {} {}\nline b\nneedle again", i, p)
                    } else {
                        format!("filler {} {}", i, p)
                    }
                })
                .collect()
        })
        .collect();
    for name in &names {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    let mut converter = FakeConverter {
        pages: names.iter().cloned().zip(pages).collect(),
        delays: HashMap::new(),
    };
    // Early documents finish last.
    for (i, name) in names.iter().enumerate() {
        converter = converter.with_delay(name, (12 - i as u64) * 2);
    }
    converter
}

#[test]
fn test_report_independent_of_pool_sizes() {
    let dir = tempdir().unwrap();
    let converter: Arc<dyn Converter> = Arc::new(many_documents(&dir));
    let opts = Opts::default();

    let baseline = run(
        dir.path(),
        "needle",
        &opts,
        PipelineTuning::new(1, 1, 1),
        Arc::clone(&converter),
    );
    assert_eq!(baseline.documents.len(), 12);
    for doc in &baseline.documents {
        let pages: Vec<usize> = doc.pages.iter().map(|p| p.page).collect();
        let mut sorted = pages.clone();
        sorted.sort_unstable();
        assert_eq!(pages, sorted);
        assert!(doc.pages.iter().all(|p| p.lines.len() == 2));
    }

    for (n, m, cap) in [(2, 1, 1), (4, 4, 2), (8, 3, 1000), (1, 8, 3)] {
        let report = run(
            dir.path(),
            "needle",
            &opts,
            PipelineTuning::new(n, m, cap),
            Arc::clone(&converter),
        );
        assert_eq!(report, baseline, "pools n={} m={} cap={}", n, m, cap);
    }
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    let converter: Arc<dyn Converter> = Arc::new(many_documents(&dir));
    let first = render_text(&run(
        dir.path(),
        "needle",
        &Opts::default(),
        PipelineTuning::new(4, 4, 2),
        Arc::clone(&converter),
    ));
    let second = render_text(&run(
        dir.path(),
        "needle",
        &Opts::default(),
        PipelineTuning::new(4, 4, 2),
        converter,
    ));
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_case_insensitive_option() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.pdf"]);
    let converter = Arc::new(FakeConverter::new(&[("a.pdf", &["Hello World\nhello"])]));
    let opts = SearchOpts {
        case_insensitive: true,
        conversion_threads: Some(1),
        search_threads: Some(1),
        ..SearchOpts::default()
    };
    let report = search_dir_with(dir.path(), "HELLO", &opts, converter).unwrap();
    assert_eq!(report.documents[0].pages[0].lines, vec!["Hello World", "hello"]);
}

#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let converter = Arc::new(FakeConverter::new(&[]));
    let result = search_documents(
        &missing,
        "x",
        &Opts::default(),
        PipelineTuning::new(1, 1, 1),
        converter,
    );
    assert!(result.is_err());
}

#[test]
fn test_file_as_root_is_fatal() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.pdf"]);
    let converter = Arc::new(FakeConverter::new(&[]));
    let result = search_documents(
        &dir.path().join("a.pdf"),
        "x",
        &Opts::default(),
        PipelineTuning::new(1, 1, 1),
        converter,
    );
    assert!(result.is_err());
}

#[test]
fn test_empty_term_is_fatal() {
    let dir = tempdir().unwrap();
    let converter = Arc::new(FakeConverter::new(&[]));
    let result = search_documents(
        dir.path(),
        "",
        &Opts::default(),
        PipelineTuning::new(1, 1, 1),
        converter,
    );
    assert!(result.is_err());
}

// --- real process adapter ---

#[test]
fn test_missing_converter_program_yields_no_pages() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.pdf"]);
    let converter = PdfToText::new("pdfsearch-test-no-such-converter");
    assert!(converter.pages(&dir.path().join("a.pdf")).is_err());

    let (report, summary) = search_documents(
        dir.path(),
        "x",
        &Opts::default(),
        PipelineTuning::new(1, 1, 1),
        Arc::new(converter),
    )
    .unwrap();
    assert!(report.is_empty());
    assert_eq!(summary.failed_documents.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_process_converter_splits_stdout_pages() {
    // `cat <file> -` with a null stdin prints the file, which here is already page text.
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("a.pdf"),
        "hello world\u{c}foo bar\nhello again\u{c}",
    )
    .unwrap();
    std::fs::write(dir.path().join("b.pdf"), "nothing here\u{c}").unwrap();

    let converter = PdfToText::new("cat");
    assert_eq!(
        converter.pages(&dir.path().join("a.pdf")).unwrap(),
        vec!["hello world".to_string(), "foo bar\nhello again".to_string()]
    );

    let report = run(
        dir.path(),
        "hello",
        &Opts::default(),
        PipelineTuning::new(2, 2, 2),
        Arc::new(converter),
    );
    let a = dir.path().canonicalize().unwrap().join("a.pdf");
    assert_eq!(
        render_text(&report),
        format!(
            "=== {} (2 matched pages)\nPage 1: hello world\nPage 2: hello again\n",
            a.display()
        )
    );
}

#[cfg(unix)]
#[test]
fn test_failing_converter_process_is_soft() {
    let dir = tempdir().unwrap();
    touch_all(&dir, &["a.pdf"]);
    let converter = PdfToText::new("false");
    assert!(converter.pages(&dir.path().join("a.pdf")).is_err());
    let report = run(
        dir.path(),
        "x",
        &Opts::default(),
        PipelineTuning::new(1, 1, 1),
        Arc::new(converter),
    );
    assert!(report.is_empty());
}
