//! Pipeline context and tuning: the bounded queues between stages and explicit pool sizes.

use crossbeam_channel::{Receiver, Sender, bounded};

use crate::utils::config::{ChannelCap, WorkerThreadLimits};
use crate::utils::fd_limit::cap_by_fd_limit;
use crate::{DocumentPath, Opts, PageMatch, PageRecord};

/// Pool sizes and queue capacity. Resolved once at the entry point and passed in explicitly,
/// so tests can run the pipeline with small fixed pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    pub conversion_threads: usize,
    pub search_threads: usize,
    /// Capacity of each of the three bounded queues.
    pub channel_cap: usize,
}

impl PipelineTuning {
    /// Fixed tuning; zero values are raised to 1.
    pub fn new(conversion_threads: usize, search_threads: usize, channel_cap: usize) -> Self {
        Self {
            conversion_threads: conversion_threads.max(1),
            search_threads: search_threads.max(1),
            channel_cap: channel_cap.max(1),
        }
    }

    /// Resolve overrides in `opts` against available parallelism and the FD limit.
    pub fn from_opts(opts: &Opts, limits: WorkerThreadLimits) -> Self {
        let conversion_threads = match opts.conversion_threads {
            Some(n) => limits.resolve(Some(n)),
            None => cap_by_fd_limit(limits.resolve(None)),
        };
        Self::new(
            conversion_threads,
            limits.resolve(opts.search_threads),
            ChannelCap::resolve(opts.channel_cap),
        )
    }
}

/// The three bounded queues. Discovery gets `path_tx`; conversion workers get `path_rx` and
/// `page_tx`; search workers get `page_rx` and `match_tx`; the aggregator gets `match_rx`.
pub struct PipelineChannels {
    pub path_tx: Sender<DocumentPath>,
    pub path_rx: Receiver<DocumentPath>,
    pub page_tx: Sender<PageRecord>,
    pub page_rx: Receiver<PageRecord>,
    pub match_tx: Sender<PageMatch>,
    pub match_rx: Receiver<PageMatch>,
}

pub fn create_pipeline_channels(channel_cap: usize) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<DocumentPath>(channel_cap);
    let (page_tx, page_rx) = bounded::<PageRecord>(channel_cap);
    let (match_tx, match_rx) = bounded::<PageMatch>(channel_cap);
    PipelineChannels {
        path_tx,
        path_rx,
        page_tx,
        page_rx,
        match_tx,
        match_rx,
    }
}
