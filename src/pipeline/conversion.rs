use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::converter::Converter;
use crate::{DocumentPath, PageRecord};

/// What one conversion worker did. Returned through its join handle; workers share no counters.
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub documents: usize,
    pub pages: usize,
    /// Documents whose conversion failed, with the reason. They contributed zero pages.
    pub failed: Vec<(PathBuf, String)>,
}

impl ConversionStats {
    pub fn merge(&mut self, other: ConversionStats) {
        self.documents += other.documents;
        self.pages += other.pages;
        self.failed.extend(other.failed);
    }
}

/// Single conversion worker: read paths from path_rx, convert, send one record per page on page_tx.
fn conversion_worker_loop(
    path_rx: Receiver<DocumentPath>,
    page_tx: Sender<PageRecord>,
    converter: Arc<dyn Converter>,
) -> ConversionStats {
    let mut stats = ConversionStats::default();
    while let Ok(document) = path_rx.recv() {
        stats.documents += 1;
        let pages = match converter.pages(&document) {
            Ok(pages) => pages,
            Err(err) => {
                log::debug!("conversion failed: {:#}", err);
                stats.failed.push((document, format!("{:#}", err)));
                continue;
            }
        };
        if pages.is_empty() {
            log::debug!("{}: no pages", document.display());
            continue;
        }
        for (idx, text) in pages.into_iter().enumerate() {
            let record = PageRecord {
                document: document.clone(),
                page_number: idx + 1,
                text,
            };
            if page_tx.send(record).is_err() {
                return stats;
            }
            stats.pages += 1;
        }
    }
    drop(page_tx);
    stats
}

/// Spawn conversion workers: read paths from path_rx, send page records on page_tx.
/// Caller must drop its own `page_tx` after this so the page queue closes when the last worker exits.
pub fn spawn_conversion_workers(
    path_rx: Receiver<DocumentPath>,
    page_tx: &Sender<PageRecord>,
    converter: Arc<dyn Converter>,
    num_threads: usize,
) -> Vec<JoinHandle<ConversionStats>> {
    (0..num_threads)
        .map(|_| {
            let path_rx = path_rx.clone();
            let page_tx = page_tx.clone();
            let converter = Arc::clone(&converter);
            thread::spawn(move || conversion_worker_loop(path_rx, page_tx, converter))
        })
        .collect()
}
