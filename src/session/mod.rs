//! Search session module
//!
//! Paginated search over a page-indexed source.
//!
//! # Overview
//!
//! The session module provides:
//! - `PageSource` - The data side: answers one page index at a time
//! - `PageBasedSearchSession` - Shared cursor with a manual pull operation
//!   (`next_page_or_null`), a lazy item stream (`results`) and a completion
//!   signal (`wait_finished`)
//! - `SearchSession` - Object-safe interface over any session
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use search_session::{FetchOutcome, PageBasedSearchSession};
//!
//! let session = PageBasedSearchSession::from_fn(|page| async move {
//!     let items = api.search("query", page).await?;
//!     Ok::<_, ApiError>(if items.is_empty() {
//!         FetchOutcome::Exhausted
//!     } else {
//!         FetchOutcome::more(items)
//!     })
//! });
//!
//! let mut results = session.results();
//! while let Some(item) = results.next().await {
//!     println!("{}", item?);
//! }
//! ```

mod completion;
mod paged;
mod source;
mod types;

pub use completion::CompletionSignal;
pub use paged::PageBasedSearchSession;
pub use source::{FnSource, PageSource};
pub use types::SearchSession;
pub(crate) use types::SessionState;
