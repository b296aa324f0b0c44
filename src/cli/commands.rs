//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Replay scripted paginated searches through a search session
#[derive(Parser, Debug)]
#[command(name = "search-session")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pull pages one at a time until the session is exhausted
    Pull {
        /// Fixture file (JSON or YAML)
        fixture: PathBuf,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Retry a failed pull this many times at the same page
        #[arg(long, default_value = "0")]
        retries: u32,
    },

    /// Consume the item stream with one or more concurrent consumers
    Stream {
        /// Fixture file (JSON or YAML)
        fixture: PathBuf,

        /// Number of consumers sharing the session
        #[arg(long, default_value = "1")]
        consumers: usize,

        /// Close the session after this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Validate a fixture file
    Validate {
        /// Fixture file (JSON or YAML)
        fixture: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
