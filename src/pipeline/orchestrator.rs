use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::converter::Converter;
use crate::engine::tools::check_root_and_canonicalize;
use crate::pipeline::{
    self, ConversionStats, LineMatcher, PipelineTuning, discover_documents,
    spawn_aggregator, spawn_conversion_workers, spawn_discovery_thread, spawn_search_workers,
};
use crate::{DocumentPath, Opts, Report};

/// Handles returned by [`run_pipeline`]: one group per stage plus the aggregator.
pub struct PipelineHandles {
    pub discovery_handle: JoinHandle<usize>,
    pub conversion_handles: Vec<JoinHandle<ConversionStats>>,
    pub search_handles: Vec<JoinHandle<usize>>,
    pub aggregator_handle: JoinHandle<Report>,
}

/// Counts gathered from the stages after the run.
#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub documents_discovered: usize,
    pub documents_converted: usize,
    pub pages_extracted: usize,
    pub pages_searched: usize,
    pub pages_matched: usize,
    /// Documents whose conversion failed (they contributed zero pages).
    pub failed_documents: Vec<(PathBuf, String)>,
    /// Entries discovery could not read (recursive mode).
    pub skipped_entries: Vec<(PathBuf, String)>,
}

/// Start discovery, conversion, search and the aggregator over `documents`.
///
/// Each queue closes when the last sender clone is dropped: the coordinator drops its own
/// senders right after handing clones to the producing stage, so a queue closes exactly when
/// every producer of that stage has exited.
pub fn run_pipeline(
    documents: Vec<DocumentPath>,
    converter: Arc<dyn Converter>,
    matcher: Arc<LineMatcher>,
    tuning: PipelineTuning,
) -> PipelineHandles {
    debug!("pipeline tuning: {:?}", tuning);
    let channels = pipeline::create_pipeline_channels(tuning.channel_cap);

    let discovery_handle = spawn_discovery_thread(channels.path_tx, documents);

    let conversion_handles = spawn_conversion_workers(
        channels.path_rx,
        &channels.page_tx,
        converter,
        tuning.conversion_threads,
    );
    drop(channels.page_tx);

    let search_handles = spawn_search_workers(
        channels.page_rx,
        &channels.match_tx,
        matcher,
        tuning.search_threads,
    );
    drop(channels.match_tx);

    let aggregator_handle = spawn_aggregator(channels.match_rx);

    PipelineHandles {
        discovery_handle,
        conversion_handles,
        search_handles,
        aggregator_handle,
    }
}

/// Join every handle of one stage, then fail if any of them panicked.
pub fn join_stage<T>(stage: &str, handles: Vec<JoinHandle<T>>) -> Result<Vec<T>> {
    let results: Vec<std::thread::Result<T>> = handles.into_iter().map(|h| h.join()).collect();
    let mut out = Vec::with_capacity(results.len());
    for result in results {
        out.push(result.map_err(|_| anyhow::anyhow!("{} thread panicked", stage))?);
    }
    debug!("{}: all {} workers finished", stage, out.len());
    Ok(out)
}

/// Wait for discovery, all conversion workers and all search workers, then take the report.
pub fn collect_report(handles: PipelineHandles) -> Result<(Report, PipelineSummary)> {
    let PipelineHandles {
        discovery_handle,
        conversion_handles,
        search_handles,
        aggregator_handle,
    } = handles;

    let documents_discovered = discovery_handle
        .join()
        .map_err(|_| anyhow::anyhow!("discovery thread panicked"))?;
    debug!("discovery: sent {} documents", documents_discovered);

    let mut conversion = ConversionStats::default();
    for stats in join_stage("conversion", conversion_handles)? {
        conversion.merge(stats);
    }
    let pages_searched: usize = join_stage("search", search_handles)?.into_iter().sum();

    let report = aggregator_handle
        .join()
        .map_err(|_| anyhow::anyhow!("aggregator thread panicked"))?;

    let summary = PipelineSummary {
        documents_discovered,
        documents_converted: conversion.documents - conversion.failed.len(),
        pages_extracted: conversion.pages,
        pages_searched,
        pages_matched: report.matched_pages(),
        failed_documents: conversion.failed,
        skipped_entries: Vec::new(),
    };
    Ok((report, summary))
}

/// Main orchestrator: discover documents under `root`, run the pipeline, return the sorted report.
/// Discovery errors are returned before any worker starts.
pub fn search_documents(
    root: &Path,
    term: &str,
    opts: &Opts,
    tuning: PipelineTuning,
    converter: Arc<dyn Converter>,
) -> Result<(Report, PipelineSummary)> {
    if term.is_empty() {
        anyhow::bail!("search term is empty");
    }
    let root = check_root_and_canonicalize(root)?;
    let discovered = discover_documents(&root, &opts.extension, opts.recursive)?;
    debug!(
        "found {} .{} documents in {}",
        discovered.documents.len(),
        opts.extension,
        root.display()
    );

    let matcher = Arc::new(LineMatcher::new(term, opts.case_insensitive));
    let handles = run_pipeline(discovered.documents, converter, matcher, tuning);
    let (report, mut summary) = collect_report(handles)?;
    summary.skipped_entries = discovered.skipped;
    debug!("{:?}", summary);
    Ok((report, summary))
}
