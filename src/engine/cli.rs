//! CLI command handler: layer settings, run the search, print the report.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::Write;
use std::sync::Arc;

use crate::Opts;
use crate::converter::PdfToText;
use crate::engine::arg_parser::Cli;
use crate::engine::tools::join_term;
use crate::pipeline::{PipelineTuning, report_failed_documents, search_documents};
use crate::report::write_report;
use crate::utils::config::WorkerThreadLimits;
use crate::utils::pdfsearch_toml::{PdfsearchToml, apply_file_to_opts, load_pdfsearch_toml};
use crate::utils::setup_logging;

/// Overwrite opts field from CLI when the flag was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, some $field:ident) => {
        if let Some(v) = $cli.$field {
            $opts.$field = Some(v);
        }
    };
    ($cli:expr, $opts:expr, $cli_field:ident => $opts_field:ident) => {
        if let Some(v) = $cli.$cli_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Defaults, then `.pdfsearch.toml` settings (when given), then CLI flags.
pub fn build_opts(cli: &Cli, file: Option<&PdfsearchToml>) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    apply_cli_opt!(cli, opts, ignore_case => case_insensitive);
    apply_cli_opt!(cli, opts, recursive => recursive);
    apply_cli_opt!(cli, opts, converter => converter);
    apply_cli_opt!(cli, opts, extension => extension);
    apply_cli_opt!(cli, opts, format => format);
    apply_cli_opt!(cli, opts, verbose => verbose);
    apply_cli_opt!(cli, opts, some conversion_threads);
    apply_cli_opt!(cli, opts, some search_threads);
    apply_cli_opt!(cli, opts, some channel_cap);
    opts
}

/// Search `cli.dir` for the joined term and print the report to stdout.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let file = load_pdfsearch_toml(&cli.dir);
    let opts = build_opts(cli, file.as_ref().ok().and_then(Option::as_ref));
    setup_logging(opts.verbose);
    if let Err(e) = &file {
        warn!("ignoring settings file: {:#}", e);
    }
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let term = join_term(&cli.term);
    let tuning = PipelineTuning::from_opts(&opts, WorkerThreadLimits::current());
    let converter = Arc::new(PdfToText::new(opts.converter.clone()));

    let (report, summary) = search_documents(&cli.dir, &term, &opts, tuning, converter)?;
    report_failed_documents(&opts, &summary);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, opts.format)?;
    out.flush().context("flush stdout")?;
    Ok(())
}
