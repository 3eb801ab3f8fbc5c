use clap::Parser;
use std::path::PathBuf;

use crate::OutputFormat;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Search the text of every PDF in a directory.
#[derive(Clone, Parser)]
#[command(name = "pdfsearch")]
#[command(about = "Print every page of every PDF in DIR that contains TERM, grouped by document.")]
pub struct Cli {
    /// Search term. Multiple words are joined with single spaces.
    #[arg(value_name = "TERM", required = true, num_args = 1..)]
    pub term: Vec<String>,

    /// Directory to search. Default: current directory.
    #[arg(long, short, value_name = "DIR", default_value = DefaultArgs::DIR)]
    pub dir: PathBuf,

    /// Match ignoring case. Boolean flags take an optional value only as `--flag=false`.
    #[arg(long, short = 'i', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub ignore_case: Option<bool>,

    /// Descend into subdirectories.
    #[arg(long, short = 'r', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub recursive: Option<bool>,

    /// Converter program, invoked as `<CONVERTER> <file> -`. Default: pdftotext.
    #[arg(long)]
    pub converter: Option<String>,

    /// Document extension to search (case-insensitive). Default: pdf.
    #[arg(long = "ext")]
    pub extension: Option<String>,

    /// Conversion worker threads. Default: available parallelism, capped by the FD limit.
    #[arg(long, short = 'j')]
    pub conversion_threads: Option<usize>,

    /// Search worker threads. Default: available parallelism.
    #[arg(long)]
    pub search_threads: Option<usize>,

    /// Capacity of each queue between stages.
    #[arg(long)]
    pub channel_cap: Option<usize>,

    /// Report format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, require_equals = true, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
