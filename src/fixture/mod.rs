//! Fixture module
//!
//! Scripted page sources for demos and tests.
//!
//! # Overview
//!
//! The fixture module provides:
//! - `Fixture` - Session settings plus scripted answers per page index
//! - `FixtureSource` - A `PageSource` replaying a fixture, including
//!   scripted fetch failures and simulated latency
//! - JSON/YAML loading with validation

mod parser;
mod source;
mod types;

pub use parser::{load_fixture, load_fixture_from_str, FixtureFormat};
pub use source::FixtureSource;
pub use types::{Fixture, FixtureEntry};

#[cfg(test)]
mod tests;
