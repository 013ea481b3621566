use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "perch-probe", about = "Resolve popover placements for a JSON scenario", version)]
pub struct Args {
    /// Scenario file, or `-` to read from stdin
    pub scenario: PathBuf,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
