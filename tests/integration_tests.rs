//! Integration tests through the public API
//!
//! Tests the full flow: fixture file → session → pulls/streams → completion

use futures::StreamExt;
use pretty_assertions::assert_eq;
use search_session::fixture::{load_fixture, FixtureSource};
use search_session::{
    FetchOutcome, PageBasedSearchSession, PageSource, SearchSession, SessionConfig,
};
use serde_json::json;
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn write_fixture(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ============================================================================
// Fixture-Backed Sessions
// ============================================================================

#[tokio::test]
async fn test_fixture_file_to_results() {
    let file = write_fixture(
        ".json",
        r#"{
            "session": {"label": "episodes"},
            "pages": [
                {"items": ["A", "B"], "has_more": true},
                {"items": ["C"], "has_more": false}
            ]
        }"#,
    );

    let session = load_fixture(file.path()).unwrap().into_session();
    let items: Vec<_> = session.results().map(Result::unwrap).collect().await;

    assert_eq!(items, vec![json!("A"), json!("B"), json!("C")]);
    assert!(session.is_finished());
    assert_eq!(session.source().fetched(), vec![0, 1]);
}

#[tokio::test]
async fn test_fixture_retry_at_same_page() {
    let file = write_fixture(
        ".yaml",
        r#"
pages:
  - error: upstream unavailable
    then:
      items: [A]
"#,
    );

    let session = load_fixture(file.path()).unwrap().into_session();

    let err = session.next_page_or_null().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(session.current_page().await, Some(0));

    assert_eq!(
        session.next_page_or_null().await.unwrap(),
        Some(vec![json!("A")])
    );
    assert!(session.is_finished());
    assert_eq!(session.next_page_or_null().await.unwrap(), None);
    assert_eq!(session.source().fetched(), vec![0, 0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fixture_fan_out_consumers() {
    let pages: Vec<_> = (0..8)
        .map(|page| json!({"items": [page * 2, page * 2 + 1], "has_more": page < 7}))
        .collect();
    let file = write_fixture(
        ".json",
        &json!({"latency_ms": 1, "pages": pages}).to_string(),
    );

    let session = load_fixture(file.path()).unwrap().into_session();
    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .results()
                    .map(Result::unwrap)
                    .collect::<Vec<_>>()
                    .await
            })
        })
        .collect();

    let mut all: Vec<u64> = Vec::new();
    for consumer in consumers {
        all.extend(
            consumer
                .await
                .unwrap()
                .into_iter()
                .map(|v| v.as_u64().unwrap()),
        );
    }
    all.sort_unstable();

    assert_eq!(all, (0..16).collect::<Vec<_>>());
    assert_eq!(session.source().fetched(), (0..8).collect::<Vec<_>>());
}

// ============================================================================
// Custom Sources
// ============================================================================

/// Source counting its fetches, exhausted after `pages` pages
struct CountingSource {
    pages: u32,
    fetches: Arc<AtomicU32>,
}

#[async_trait::async_trait]
impl PageSource for CountingSource {
    type Item = u32;
    type Error = std::io::Error;

    async fn fetch_page(&self, page: u32) -> Result<FetchOutcome<u32>, std::io::Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(if page < self.pages {
            FetchOutcome::more(vec![page])
        } else {
            FetchOutcome::Exhausted
        })
    }
}

#[tokio::test]
async fn test_custom_source_stops_fetching_after_exhaustion() {
    let fetches = Arc::new(AtomicU32::new(0));
    let session = PageBasedSearchSession::with_config(
        CountingSource {
            pages: 3,
            fetches: Arc::clone(&fetches),
        },
        SessionConfig::new().with_label("counting"),
    );

    let items: Vec<u32> = session.results().map(Result::unwrap).collect().await;
    assert_eq!(items, vec![0, 1, 2]);
    assert_eq!(fetches.load(Ordering::SeqCst), 4);

    for _ in 0..3 {
        assert!(session.next_page_or_null().await.unwrap().is_none());
    }
    assert_eq!(fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_completion_alongside_other_conditions() {
    let session: Arc<dyn SearchSession<Item = u32, Error = String>> =
        Arc::new(PageBasedSearchSession::from_fn(|page| async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok::<_, String>(if page < 3 {
                FetchOutcome::more(vec![page])
            } else {
                FetchOutcome::Exhausted
            })
        }));

    let consumer = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.results().count().await })
    };

    let outcome = tokio::select! {
        () = session.wait_finished() => "finished",
        () = tokio::time::sleep(Duration::from_secs(5)) => "timed out",
    };

    assert_eq!(outcome, "finished");
    assert_eq!(consumer.await.unwrap(), 3);
}
