//! Scripted page source
//!
//! Replays a [`Fixture`] as a [`PageSource`].

use super::types::{Fixture, FixtureEntry};
use crate::error::Error;
use crate::session::{PageBasedSearchSession, PageSource};
use crate::types::FetchOutcome;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Page source answering from a fixture
#[derive(Debug)]
pub struct FixtureSource {
    pages: Vec<Option<FixtureEntry>>,
    latency: Duration,
    /// Failures already served, per page index
    failures: Mutex<HashMap<u32, u32>>,
    /// Every page index asked for, in order
    fetched: Mutex<Vec<u32>>,
}

impl FixtureSource {
    /// Create a source from a fixture
    pub fn new(fixture: &Fixture) -> Self {
        Self {
            pages: fixture.pages.clone(),
            latency: Duration::from_millis(fixture.latency_ms),
            failures: Mutex::new(HashMap::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Page indices fetched so far, in order
    pub fn fetched(&self) -> Vec<u32> {
        self.fetched
            .lock()
            .map(|fetched| fetched.clone())
            .unwrap_or_default()
    }

    fn answer(&self, page: u32) -> Result<FetchOutcome<Value>, Error> {
        let entry = usize::try_from(page)
            .ok()
            .and_then(|index| self.pages.get(index))
            .and_then(Option::as_ref);

        match entry {
            None | Some(FixtureEntry::Exhausted { .. }) => Ok(FetchOutcome::Exhausted),
            Some(FixtureEntry::Page(page)) => Ok(FetchOutcome::Page(page.clone())),
            Some(FixtureEntry::Failure { error, times, then }) => {
                let mut failures = self
                    .failures
                    .lock()
                    .map_err(|_| Error::fixture("failure counter poisoned"))?;
                let served = failures.entry(page).or_insert(0);
                if *served < *times {
                    *served += 1;
                    debug!("Fixture failing page {} ({}/{})", page, served, times);
                    return Err(Error::fetch(page, error.clone()));
                }
                Ok(then
                    .clone()
                    .map_or(FetchOutcome::Exhausted, FetchOutcome::Page))
            }
        }
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    type Item = Value;
    type Error = Error;

    async fn fetch_page(&self, page: u32) -> Result<FetchOutcome<Value>, Error> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(page);
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.answer(page)
    }
}

impl Fixture {
    /// Build a search session replaying this fixture
    pub fn into_session(self) -> PageBasedSearchSession<FixtureSource> {
        let source = FixtureSource::new(&self);
        PageBasedSearchSession::with_config(source, self.session)
    }
}
