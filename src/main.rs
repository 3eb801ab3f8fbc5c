//! pdfsearch CLI: print every page of every PDF in a directory that contains a term.

use anyhow::Result;
use clap::Parser;
use pdfsearch::engine::arg_parser::Cli;
use pdfsearch::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
