//! Fixture definition types
//!
//! A fixture scripts what a page source answers for each page index.

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::types::Page;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_times() -> u32 {
    1
}

/// Scripted answer for one page index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FixtureEntry {
    /// Fail `times` times, then answer with `then` (or exhaustion if unset)
    Failure {
        /// Message of the scripted fetch error
        error: String,
        /// How many consecutive fetches of this page fail
        #[serde(default = "default_times")]
        times: u32,
        /// Answer once the failures are used up
        #[serde(default, skip_serializing_if = "Option::is_none")]
        then: Option<Page<Value>>,
    },

    /// Explicit "no page" at this index (same as a `null` entry)
    Exhausted {
        /// Must be `true`
        exhausted: bool,
    },

    /// A page of items
    Page(Page<Value>),
}

impl FixtureEntry {
    /// Create a page entry that is followed by more pages
    pub fn more(items: Vec<Value>) -> Self {
        Self::Page(Page::more(items))
    }

    /// Create a final page entry
    pub fn last(items: Vec<Value>) -> Self {
        Self::Page(Page::last(items))
    }

    /// Create an explicit exhaustion entry
    pub fn exhausted() -> Self {
        Self::Exhausted { exhausted: true }
    }

    /// Create a failing entry that fails once and then answers `then`
    pub fn failure(error: impl Into<String>, then: Option<Page<Value>>) -> Self {
        Self::Failure {
            error: error.into(),
            times: 1,
            then,
        }
    }
}

/// Complete fixture: session settings plus the scripted pages
///
/// `pages[i]` answers page index `i`. An `{exhausted: true}` entry, a `null`
/// entry, or any index past the end means the source is exhausted there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Simulated latency of every fetch, in milliseconds
    #[serde(default)]
    pub latency_ms: u64,

    /// Scripted answers, indexed by page
    #[serde(default)]
    pub pages: Vec<Option<FixtureEntry>>,
}

impl Fixture {
    /// Create a fixture from scripted pages
    pub fn new(pages: Vec<Option<FixtureEntry>>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Set the session config
    #[must_use]
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Set the simulated fetch latency
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Total number of items across all scripted pages
    pub fn item_count(&self) -> usize {
        self.pages
            .iter()
            .flatten()
            .map(|entry| match entry {
                FixtureEntry::Page(page) => page.len(),
                FixtureEntry::Failure { then, .. } => then.as_ref().map_or(0, Page::len),
                FixtureEntry::Exhausted { .. } => 0,
            })
            .sum()
    }

    /// Validate the fixture
    pub fn validate(&self) -> Result<()> {
        self.session.validate()?;

        for (index, entry) in self.pages.iter().enumerate() {
            match entry {
                Some(FixtureEntry::Failure { error, times, .. }) => {
                    if *times == 0 {
                        return Err(Error::fixture(format!(
                            "Page {index}: failure entry must fail at least once"
                        )));
                    }
                    if error.is_empty() {
                        return Err(Error::fixture(format!(
                            "Page {index}: failure entry needs an error message"
                        )));
                    }
                }
                Some(FixtureEntry::Exhausted { exhausted: false }) => {
                    return Err(Error::fixture(format!(
                        "Page {index}: 'exhausted' can only be true"
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
