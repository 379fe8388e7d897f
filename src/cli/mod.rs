//! CLI argument parsing for gradeshape
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod commands;
pub mod format;
pub mod parse;

use clap::Parser;

use gradeshape_core::format::OutputFormat;
pub use commands::Commands;
use parse::parse_format;

/// Gradeshape - compress detailed grades into coarser report shapes
#[derive(Parser, Debug)]
#[command(name = "gradeshape")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, records)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Log debug events from the compressor
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter, e.g. `trace` or `gradeshape_core=debug`
    #[arg(long, global = true, env = "GRADESHAPE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
