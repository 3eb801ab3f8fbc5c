pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod pdfsearch_toml;

pub use config::*;
pub use logger::setup_logging;
