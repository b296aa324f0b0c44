//! Session types and traits
//!
//! Defines the consumer-facing session interface and the cursor state every
//! page-based session carries.

use crate::types::EXHAUSTED_PAGE;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// A stateful, multi-page search
///
/// A session holds the position of its query. Every consumer of one session
/// shares that position: pulling a page by hand means [`results`] will not
/// see it, and two `results` streams split the pages between them.
///
/// [`results`]: SearchSession::results
#[async_trait]
pub trait SearchSession: Send + Sync {
    /// Item type of the search results
    type Item: Send + 'static;

    /// Error reported when fetching a page fails
    type Error: Send + 'static;

    /// Fetch the next page, or `None` once there are no more pages
    async fn next_page_or_null(&self) -> Result<Option<Vec<Self::Item>>, Self::Error>;

    /// All remaining results as a lazy stream of items
    fn results(&self) -> BoxStream<'static, Result<Self::Item, Self::Error>>;

    /// Wait until the session has no more results
    async fn wait_finished(&self);

    /// Check if the session has no more results
    fn is_finished(&self) -> bool;
}

/// Cursor and termination flag of a page-based session
///
/// Only ever touched while the session lock is held. The fields are private
/// so the cursor can only move forward or jump to [`EXHAUSTED_PAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionState {
    cursor: u32,
    finished: bool,
}

impl SessionState {
    /// Create state positioned at `initial_page`
    ///
    /// Starting at the reserved index gives an already finished state.
    pub fn new(initial_page: u32) -> Self {
        Self {
            cursor: initial_page,
            finished: initial_page == EXHAUSTED_PAGE,
        }
    }

    /// Move to the next page index
    ///
    /// Returns `false` without moving if the next index would be the reserved
    /// one; the caller must finish the session instead.
    pub fn advance(&mut self) -> bool {
        match self.cursor.checked_add(1) {
            Some(next) if next != EXHAUSTED_PAGE => {
                self.cursor = next;
                true
            }
            _ => false,
        }
    }

    /// Jump to the exhausted state
    ///
    /// Returns `true` only on the transition itself.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.cursor = EXHAUSTED_PAGE;
        self.finished = true;
        true
    }

    /// Next page index to fetch, or [`EXHAUSTED_PAGE`]
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Has the session run out of pages?
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Next page index to fetch, `None` once finished
    pub fn current_page(&self) -> Option<u32> {
        (!self.finished).then_some(self.cursor)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(0)
    }
}
