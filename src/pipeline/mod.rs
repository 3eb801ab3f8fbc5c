//! Pipeline components: discovery, conversion, search, aggregation and their coordination.
//!
//! Discovery → path queue → conversion workers → page queue → search workers → match queue → aggregator.

pub mod aggregate;
pub mod context;
pub mod conversion;
pub mod discovery;
pub mod error_handler;
pub mod orchestrator;
pub mod search;

pub use aggregate::{Aggregator, spawn_aggregator};
pub use context::{PipelineChannels, PipelineTuning, create_pipeline_channels};
pub use conversion::{ConversionStats, spawn_conversion_workers};
pub use discovery::{Discovered, discover_documents, spawn_discovery_thread};
pub use error_handler::report_failed_documents;
pub use orchestrator::{
    PipelineHandles, PipelineSummary, collect_report, join_stage, run_pipeline, search_documents,
};
pub use search::{LineMatcher, spawn_search_workers};
