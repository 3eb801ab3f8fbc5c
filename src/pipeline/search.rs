//! Search stage: match page lines against the term and forward pages with at least one hit.

use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::{PageMatch, PageRecord};

/// Literal substring predicate applied per line.
#[derive(Clone, Debug)]
pub struct LineMatcher {
    needle: String,
    case_insensitive: bool,
}

impl LineMatcher {
    pub fn new(term: &str, case_insensitive: bool) -> Self {
        let needle = if case_insensitive {
            term.to_lowercase()
        } else {
            term.to_string()
        };
        Self {
            needle,
            case_insensitive,
        }
    }

    pub fn is_match(&self, line: &str) -> bool {
        if self.case_insensitive {
            line.to_lowercase().contains(&self.needle)
        } else {
            line.contains(&self.needle)
        }
    }

    /// Lines of `text` containing the term, in order, with original casing.
    pub fn matched_lines(&self, text: &str) -> Vec<String> {
        text.lines()
            .filter(|line| self.is_match(line))
            .map(str::to_string)
            .collect()
    }

    /// Search one page. `None` when no line matches.
    pub fn search_page(&self, record: PageRecord) -> Option<PageMatch> {
        let matched_lines = self.matched_lines(&record.text);
        if matched_lines.is_empty() {
            return None;
        }
        Some(PageMatch {
            document: record.document,
            page_number: record.page_number,
            matched_lines,
        })
    }
}

/// Single search worker: read records from page_rx, send matches on match_tx. Returns pages searched.
fn search_worker_loop(
    page_rx: Receiver<PageRecord>,
    match_tx: Sender<PageMatch>,
    matcher: Arc<LineMatcher>,
) -> usize {
    let mut searched = 0_usize;
    while let Ok(record) = page_rx.recv() {
        searched += 1;
        if let Some(page_match) = matcher.search_page(record)
            && match_tx.send(page_match).is_err()
        {
            break;
        }
    }
    drop(match_tx);
    searched
}

/// Spawn search workers. Caller must drop its own `match_tx` after this so the match queue
/// closes when the last worker exits.
pub fn spawn_search_workers(
    page_rx: Receiver<PageRecord>,
    match_tx: &Sender<PageMatch>,
    matcher: Arc<LineMatcher>,
    num_threads: usize,
) -> Vec<JoinHandle<usize>> {
    (0..num_threads)
        .map(|_| {
            let page_rx = page_rx.clone();
            let match_tx = match_tx.clone();
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || search_worker_loop(page_rx, match_tx, matcher))
        })
        .collect()
}
