// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # search-session
//!
//! Paginated search sessions over page-indexed sources.
//!
//! A session turns a "fetch page n" capability into a shared cursor that
//! any number of tasks can drive, either page by page or as a lazy stream of
//! items, and tells every observer exactly once when the results run out.
//!
//! ## Features
//!
//! - **Manual pulls**: `next_page_or_null` serializes fetches behind one lock,
//!   so concurrent callers never fetch the same page twice or skip one
//! - **Lazy streams**: `results` flattens pages into a `futures::Stream`
//!   sharing the session cursor
//! - **Completion signal**: `wait_finished` resolves for every waiter, early or
//!   late, once the session is exhausted
//! - **Retryable failures**: a failed fetch leaves the cursor in place
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use search_session::{FetchOutcome, PageBasedSearchSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = PageBasedSearchSession::from_fn(|page| async move {
//!         Ok::<_, String>(match page {
//!             0 => FetchOutcome::more(vec!["a", "b"]),
//!             1 => FetchOutcome::last(vec!["c"]),
//!             _ => FetchOutcome::Exhausted,
//!         })
//!     });
//!
//!     let items: Vec<_> = session.results().collect().await;
//!     session.wait_finished().await;
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                PageBasedSearchSession                     │
//! │  next_page_or_null()   results()   wait_finished()        │
//! └───────────────────────────────────────────────────────────┘
//!          │ lock(cursor)             │ fire once
//! ┌────────┴──────────┐      ┌────────┴─────────┐
//! │   PageSource      │      │ CompletionSignal │
//! │ fetch_page(n) ->  │      │   watch<bool>    │
//! │ Page | Exhausted  │      └──────────────────┘
//! │ | Err             │
//! └───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types (pages and fetch outcomes)
pub mod types;

/// Session configuration
pub mod config;

/// Search sessions
pub mod session;

/// Scripted page sources
pub mod fixture;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use session::{FnSource, PageBasedSearchSession, PageSource, SearchSession};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
