//! Page-based search session
//!
//! Turns a [`PageSource`] into a shared, lock-guarded cursor with a manual
//! pull operation, a lazy item stream and a completion signal.

use super::completion::CompletionSignal;
use super::source::{FnSource, PageSource};
use super::types::{SearchSession, SessionState};
use crate::config::SessionConfig;
use crate::types::{FetchOutcome, Page};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Search session over a page-indexed source
///
/// Cloning the handle does not fork the search: all clones share one cursor
/// and one completion signal.
pub struct PageBasedSearchSession<S: PageSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    state: Mutex<SessionState>,
    completion: CompletionSignal,
    label: String,
}

impl<S: PageSource> PageBasedSearchSession<S> {
    /// Create a session starting at page 0
    pub fn new(source: S) -> Self {
        Self::with_config(source, SessionConfig::default())
    }

    /// Create a session from a config
    pub fn with_config(source: S, config: SessionConfig) -> Self {
        let state = SessionState::new(config.initial_page);
        let completion = CompletionSignal::new();
        if state.is_finished() {
            completion.fire();
        }

        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(state),
                completion,
                label: config.label().to_string(),
            }),
        }
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Label used in log events
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Fetch the next page
    ///
    /// Returns `Ok(None)` once the session is finished, without asking the
    /// source again. Calls are serialized: concurrent callers each get a
    /// distinct page, in page order.
    ///
    /// A fetch error is returned as-is and leaves the cursor where it was, so
    /// the next call asks for the same page. Dropping the returned future
    /// mid-fetch has the same effect.
    pub async fn next_page_or_null(&self) -> Result<Option<Vec<S::Item>>, S::Error> {
        let mut state = self.inner.state.lock().await;
        if state.is_finished() {
            return Ok(None);
        }

        let page = state.cursor();
        debug!("Session '{}' fetching page {}", self.inner.label, page);

        let outcome = match self.inner.source.fetch_page(page).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(
                    "Session '{}' failed to fetch page {}: {}",
                    self.inner.label, page, e
                );
                return Err(e);
            }
        };

        match outcome {
            FetchOutcome::Exhausted => {
                self.inner.close(&mut state);
                Ok(None)
            }
            FetchOutcome::Page(Page { items, has_more }) => {
                debug!(
                    "Session '{}' page {}: {} items, has_more={}",
                    self.inner.label,
                    page,
                    items.len(),
                    has_more
                );
                if !has_more || !state.advance() {
                    self.inner.close(&mut state);
                }
                Ok(Some(items))
            }
        }
    }

    /// All remaining results as a lazy stream of items
    ///
    /// Pages are pulled one at a time through [`next_page_or_null`], only when
    /// the buffered items of the previous page have been consumed. The stream
    /// ends when the session runs out of pages or a page comes back empty; in
    /// both cases the session is finished. A fetch error is yielded once and
    /// ends the stream, leaving the session retryable.
    ///
    /// Streams share the session cursor: two streams over one session
    /// partition its pages rather than each seeing all of them.
    ///
    /// [`next_page_or_null`]: Self::next_page_or_null
    pub fn results(&self) -> impl Stream<Item = Result<S::Item, S::Error>> + Send + 'static {
        let seed = Some((self.clone(), VecDeque::<S::Item>::new()));
        stream::unfold(seed, |state| async move {
            let (session, mut buffered) = state?;
            loop {
                if let Some(item) = buffered.pop_front() {
                    return Some((Ok(item), Some((session, buffered))));
                }
                match session.next_page_or_null().await {
                    Ok(Some(items)) if !items.is_empty() => buffered = VecDeque::from(items),
                    Ok(_) => {
                        session.finish().await;
                        return None;
                    }
                    Err(e) => return Some((Err(e), None)),
                }
            }
        })
    }

    /// Mark the session as having no more results
    ///
    /// Waits for any in-flight pull to complete. No-op if already finished.
    pub async fn finish(&self) {
        let mut state = self.inner.state.lock().await;
        self.inner.close(&mut state);
    }

    /// Wait until the session has no more results
    ///
    /// Returns at once if it already has. The future is cancel safe and can
    /// sit in a `tokio::select!` next to other conditions.
    pub async fn wait_finished(&self) {
        self.inner.completion.wait().await;
    }

    /// Check if the session has no more results
    pub fn is_finished(&self) -> bool {
        self.inner.completion.is_fired()
    }

    /// Next page index the session will fetch, `None` once finished
    ///
    /// Waits for any in-flight pull to complete.
    pub async fn current_page(&self) -> Option<u32> {
        self.inner.state.lock().await.current_page()
    }
}

impl<F, Fut, T, E> PageBasedSearchSession<FnSource<F>>
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<FetchOutcome<T>, E>> + Send,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
{
    /// Create a session over an async fetch closure
    pub fn from_fn(fetch: F) -> Self {
        Self::new(FnSource::new(fetch))
    }
}

impl<S> Inner<S> {
    /// Finish the session and fire completion, given the held lock
    fn close(&self, state: &mut SessionState) {
        if state.finish() {
            self.completion.fire();
            info!("Session '{}' has no more results", self.label);
        }
    }
}

impl<S: PageSource> Clone for PageBasedSearchSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PageSource> fmt::Debug for PageBasedSearchSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageBasedSearchSession")
            .field("label", &self.inner.label)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<S: PageSource> SearchSession for PageBasedSearchSession<S> {
    type Item = S::Item;
    type Error = S::Error;

    async fn next_page_or_null(&self) -> Result<Option<Vec<S::Item>>, S::Error> {
        PageBasedSearchSession::next_page_or_null(self).await
    }

    fn results(&self) -> BoxStream<'static, Result<S::Item, S::Error>> {
        PageBasedSearchSession::results(self).boxed()
    }

    async fn wait_finished(&self) {
        PageBasedSearchSession::wait_finished(self).await;
    }

    fn is_finished(&self) -> bool {
        PageBasedSearchSession::is_finished(self)
    }
}
