//! CLI module
//!
//! Command-line interface for replaying scripted searches.
//!
//! # Commands
//!
//! - `pull` - Pull pages by hand, optionally retrying failed pulls
//! - `stream` - Consume the item stream with concurrent consumers
//! - `validate` - Check a fixture file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{RunSummary, Runner};
