//! perch-probe: replay popover placement scenarios from JSON.
//!
//! Reads a scenario file, runs each case through a [`perch::PopoverArena`]
//! and prints the first-pass and measured placements on stdout.

mod cli;
mod logging;
mod scenario;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::Args;
use crate::logging::setup_logging;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let scenario = scenario::load(&args.scenario)?;
    tracing::info!(cases = scenario.cases.len(), "Running scenario");

    let reports = scenario.run()?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&reports)
    } else {
        serde_json::to_string(&reports)
    }
    .context("Failed to serialize placement reports")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("Failed to write to stdout")?;
    Ok(())
}
