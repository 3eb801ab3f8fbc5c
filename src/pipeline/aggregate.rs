//! Aggregator: the single consumer of the match queue. Owns all per-document groups.

use crossbeam_channel::Receiver;
use std::collections::HashMap;
use std::thread::{self, JoinHandle};

use crate::{DocumentMatches, DocumentPath, PageMatch, Report};

/// Accumulates page matches per document in arrival order; sorted only in [`Aggregator::finish`].
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: HashMap<DocumentPath, DocumentMatches>,
    received: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page_match: PageMatch) {
        self.received += 1;
        let group = self.groups.entry(page_match.document).or_default();
        if group
            .pages
            .insert(page_match.page_number, page_match.matched_lines)
            .is_some()
        {
            // Only reachable when the same document was discovered twice.
            log::debug!("page {} matched more than once", page_match.page_number);
        }
    }

    /// Page matches received so far.
    pub fn received(&self) -> usize {
        self.received
    }

    /// Drain `match_rx` until it is closed and empty.
    pub fn drain(&mut self, match_rx: &Receiver<PageMatch>) {
        while let Ok(page_match) = match_rx.recv() {
            self.insert(page_match);
        }
    }

    pub fn finish(self) -> Report {
        Report::from_groups(self.groups)
    }
}

/// Spawn the aggregator task. It returns only after every search worker has dropped its sender.
pub fn spawn_aggregator(match_rx: Receiver<PageMatch>) -> JoinHandle<Report> {
    thread::spawn(move || {
        let mut aggregator = Aggregator::new();
        aggregator.drain(&match_rx);
        log::debug!(
            "aggregator: match queue closed after {} page matches",
            aggregator.received()
        );
        aggregator.finish()
    })
}
