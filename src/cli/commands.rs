use clap::{ArgAction, Parser, Subcommand};
use retention_probe::report::ReportFormat;
use std::path::PathBuf;

/// `retention-probe` - Decide whether a departed user's data must be retained.
#[derive(Parser, Debug)]
#[command(name = "retention-probe")]
#[command(version)]
#[command(
    about = "Investigate a departed user's footprint across directory, mailbox and storage.",
    long_about = None
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Investigate one alias and write a retention report
    Investigate {
        /// User alias (prompted for when omitted)
        #[arg(short, long)]
        alias: Option<String>,

        /// Report format (default from config: html)
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,

        /// Directory the report is written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the effective configuration (tokens redacted)
    Status,
}
