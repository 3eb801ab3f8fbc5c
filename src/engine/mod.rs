//! Engine module: command-line surface and path helpers

pub mod arg_parser;
pub mod cli;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{build_opts, handle_run};
pub use tools::{check_root_and_canonicalize, has_document_extension, join_term};
