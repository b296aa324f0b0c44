//! Common types shared by sessions and page sources
//!
//! Defines the page batch handed out by a source and the three-way outcome of
//! a single fetch.

use serde::{Deserialize, Serialize};

/// Reserved cursor value meaning "no further pages will ever be fetched"
pub const EXHAUSTED_PAGE: u32 = u32::MAX;

// ============================================================================
// Page
// ============================================================================

/// One batch of results plus a flag telling whether further pages exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items of this page, in order
    pub items: Vec<T>,
    /// Whether the source has more pages after this one
    #[serde(default)]
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// Create a page that is followed by more pages
    pub fn more(items: Vec<T>) -> Self {
        Self::new(items, true)
    }

    /// Create the final page of a result set
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, false)
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Fetch Outcome
// ============================================================================

/// Successful answer of a page source for one page index
///
/// Failures are not part of this type; sources report them through the `Err`
/// side of their `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// A page of results
    Page(Page<T>),
    /// The source has nothing at this index and never will
    Exhausted,
}

impl<T> FetchOutcome<T> {
    /// Shorthand for a page that is followed by more pages
    pub fn more(items: Vec<T>) -> Self {
        Self::Page(Page::more(items))
    }

    /// Shorthand for the final page
    pub fn last(items: Vec<T>) -> Self {
        Self::Page(Page::last(items))
    }

    /// Check if this is an exhaustion result
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Check if this carries a page
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }
}

impl<T> From<Page<T>> for FetchOutcome<T> {
    fn from(page: Page<T>) -> Self {
        Self::Page(page)
    }
}

/// Adapter for list-returning sources without a continuation flag.
///
/// `Some(items)` always claims more pages; `None` is exhaustion.
impl<T> From<Option<Vec<T>>> for FetchOutcome<T> {
    fn from(items: Option<Vec<T>>) -> Self {
        match items {
            Some(items) => Self::more(items),
            None => Self::Exhausted,
        }
    }
}

/// Adapter for sources that answer with an optional page.
impl<T> From<Option<Page<T>>> for FetchOutcome<T> {
    fn from(page: Option<Page<T>>) -> Self {
        page.map_or(Self::Exhausted, Self::Page)
    }
}
