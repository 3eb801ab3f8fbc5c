//! Discovery stage: list candidate documents under the target directory, then feed them to the path queue.

use anyhow::{Context, Result, bail};
use crossbeam_channel::Sender;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use walkdir::WalkDir;

use crate::DocumentPath;
use crate::engine::tools::has_document_extension;

/// Documents found by [`discover_documents`] plus entries that could not be read (recursive mode only).
#[derive(Debug, Default)]
pub struct Discovered {
    pub documents: Vec<DocumentPath>,
    pub skipped: Vec<(PathBuf, String)>,
}

/// List the documents in `root` whose name ends in `.<extension>` (case-insensitive).
///
/// `root` must already be canonical. Only immediate entries are considered unless `recursive`.
/// Directories are skipped; every returned path is canonical. Failing to list `root` itself is
/// an error; unreadable entries below it are collected in [`Discovered::skipped`].
pub fn discover_documents(root: &Path, extension: &str, recursive: bool) -> Result<Discovered> {
    if !root.is_dir() {
        bail!("not a directory: {}", root.display());
    }
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut discovered = Discovered::default();
    for result in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err).with_context(|| format!("read directory {}", root.display()));
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                log::warn!("Skipping unreadable entry: {}", err);
                discovered.skipped.push((path, err.to_string()));
                continue;
            }
        };
        if entry.file_type().is_dir() || !has_document_extension(entry.path(), extension) {
            continue;
        }
        match entry.path().canonicalize() {
            Ok(path) => discovered.documents.push(path),
            Err(err) => {
                log::warn!("Skipping {}: {}", entry.path().display(), err);
                discovered
                    .skipped
                    .push((entry.into_path(), err.to_string()));
            }
        }
    }
    Ok(discovered)
}

/// Spawn the discovery task: send each document on `path_tx`, blocking while the queue is full.
/// Drops `path_tx` when done so conversion workers see the queue close. Returns the count sent.
pub fn spawn_discovery_thread(
    path_tx: Sender<DocumentPath>,
    documents: Vec<DocumentPath>,
) -> JoinHandle<usize> {
    thread::spawn(move || {
        let mut count = 0_usize;
        for path in documents {
            if path_tx.send(path).is_err() {
                break;
            }
            count += 1;
        }
        drop(path_tx);
        count
    })
}
