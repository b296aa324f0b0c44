//! Page sources
//!
//! The data side of a session: anything that can answer "what is on page n".

use crate::types::FetchOutcome;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;

/// Core trait for page-indexed data sources
///
/// A source is asked for one page index at a time, in increasing order, and
/// never concurrently by the same session. It answers with a page, with
/// [`FetchOutcome::Exhausted`], or with an error. Errors are handed back to
/// the caller of the session untouched.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    /// Item type carried on pages
    type Item: Send + 'static;

    /// Error reported by a failed fetch
    type Error: fmt::Display + Send + 'static;

    /// Fetch the page at `page`
    async fn fetch_page(&self, page: u32) -> Result<FetchOutcome<Self::Item>, Self::Error>;
}

/// Page source backed by an async closure
///
/// ```rust,ignore
/// let source = FnSource::new(|page| async move {
///     let items = api.search(query, page).await?;
///     Ok::<_, MyError>(FetchOutcome::Page(items))
/// });
/// ```
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F> {
    /// Wrap a fetch closure
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut, T, E> PageSource for FnSource<F>
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchOutcome<T>, E>> + Send,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
{
    type Item = T;
    type Error = E;

    async fn fetch_page(&self, page: u32) -> Result<FetchOutcome<T>, E> {
        (self.fetch)(page).await
    }
}
