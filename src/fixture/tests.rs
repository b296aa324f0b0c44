//! Tests for fixture module

use super::*;
use crate::error::Error;
use crate::session::PageSource;
use crate::types::{FetchOutcome, Page};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use test_case::test_case;

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_load_json_fixture() {
    let json = r#"{
        "session": {"initial_page": 0, "label": "episodes"},
        "pages": [
            {"items": ["A", "B"], "has_more": true},
            {"items": ["C"]}
        ]
    }"#;

    let fixture = load_fixture_from_str(json, FixtureFormat::Json).unwrap();
    assert_eq!(fixture.session.label(), "episodes");
    assert_eq!(fixture.latency_ms, 0);
    assert_eq!(
        fixture.pages,
        vec![
            Some(FixtureEntry::more(vec![json!("A"), json!("B")])),
            Some(FixtureEntry::last(vec![json!("C")])),
        ]
    );
    assert_eq!(fixture.item_count(), 3);
}

#[test]
fn test_load_yaml_fixture() {
    let yaml = r#"
latency_ms: 5
pages:
  - items: [{id: 1}]
    has_more: true
  - error: connection reset
    times: 2
    then:
      items: [{id: 2}]
  - ~
"#;

    let fixture = load_fixture_from_str(yaml, FixtureFormat::Yaml).unwrap();
    assert_eq!(fixture.latency_ms, 5);
    assert_eq!(fixture.session, crate::config::SessionConfig::default());
    assert_eq!(
        fixture.pages[1],
        Some(FixtureEntry::Failure {
            error: "connection reset".to_string(),
            times: 2,
            then: Some(Page::last(vec![json!({"id": 2})])),
        })
    );
    assert_eq!(fixture.pages[2], None);
}

#[test]
fn test_load_explicit_exhaustion_entry() {
    let json = r#"{"pages": [{"items": ["A"], "has_more": true}, {"exhausted": true}]}"#;

    let fixture = load_fixture_from_str(json, FixtureFormat::Json).unwrap();
    assert_eq!(
        fixture.pages,
        vec![
            Some(FixtureEntry::more(vec![json!("A")])),
            Some(FixtureEntry::exhausted()),
        ]
    );
    assert_eq!(fixture.item_count(), 1);

    let yaml = "pages:\n  - exhausted: true\n";
    let fixture = load_fixture_from_str(yaml, FixtureFormat::Yaml).unwrap();
    assert_eq!(fixture.pages, vec![Some(FixtureEntry::exhausted())]);
}

#[test]
fn test_failure_entry_defaults() {
    let fixture =
        load_fixture_from_str(r#"{"pages": [{"error": "boom"}]}"#, FixtureFormat::Json).unwrap();
    assert_eq!(fixture.pages[0], Some(FixtureEntry::failure("boom", None)));
}

#[test_case(r#"{"pages": [{"error": "boom", "times": 0}]}"# ; "zero failures")]
#[test_case(r#"{"pages": [{"error": ""}]}"# ; "empty error message")]
#[test_case(r#"{"pages": [{"exhausted": false}]}"# ; "exhausted set to false")]
#[test_case(r#"{"session": {"initial_page": 4294967295}, "pages": []}"# ; "reserved initial page")]
fn test_invalid_fixture(json: &str) {
    assert!(load_fixture_from_str(json, FixtureFormat::Json).is_err());
}

#[test]
fn test_malformed_fixture() {
    let err = load_fixture_from_str("{not json", FixtureFormat::Json).unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[test_case("pages.yaml", FixtureFormat::Yaml)]
#[test_case("pages.YML", FixtureFormat::Yaml)]
#[test_case("pages.json", FixtureFormat::Json)]
#[test_case("pages", FixtureFormat::Json)]
fn test_format_from_path(path: &str, expected: FixtureFormat) {
    assert_eq!(FixtureFormat::from_path(Path::new(path)), expected);
}

#[test]
fn test_load_fixture_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "pages:\n  - items: [1, 2]\n").unwrap();

    let fixture = load_fixture(file.path()).unwrap();
    assert_eq!(fixture.item_count(), 2);
}

#[test]
fn test_load_fixture_unreadable_path() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_fixture(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_fixture_missing_file() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_path_buf();
    drop(file);

    let err = load_fixture(&path).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

// ============================================================================
// FixtureSource Tests
// ============================================================================

#[tokio::test]
async fn test_source_answers_by_index() {
    let fixture = Fixture::new(vec![
        Some(FixtureEntry::more(vec![json!(1)])),
        None,
        Some(FixtureEntry::last(vec![json!(3)])),
    ]);
    let source = FixtureSource::new(&fixture);

    assert_eq!(
        source.fetch_page(0).await.unwrap(),
        FetchOutcome::more(vec![json!(1)])
    );
    assert!(source.fetch_page(1).await.unwrap().is_exhausted());
    assert!(source.fetch_page(2).await.unwrap().is_page());
    assert!(source.fetch_page(99).await.unwrap().is_exhausted());
    assert_eq!(source.fetched(), vec![0, 1, 2, 99]);
}

#[tokio::test]
async fn test_source_scripted_failures() {
    let fixture = Fixture::new(vec![Some(FixtureEntry::Failure {
        error: "timeout".to_string(),
        times: 2,
        then: Some(Page::last(vec![json!("A")])),
    })]);
    let source = FixtureSource::new(&fixture);

    for _ in 0..2 {
        let err = source.fetch_page(0).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "Fetch of page 0 failed: timeout");
    }
    assert_eq!(
        source.fetch_page(0).await.unwrap(),
        FetchOutcome::last(vec![json!("A")])
    );
}

#[tokio::test]
async fn test_failure_without_then_is_exhausted() {
    let fixture = Fixture::new(vec![Some(FixtureEntry::failure("boom", None))]);
    let source = FixtureSource::new(&fixture);

    assert!(source.fetch_page(0).await.is_err());
    assert!(source.fetch_page(0).await.unwrap().is_exhausted());
}

#[tokio::test]
async fn test_fixture_into_session() {
    let fixture = Fixture::new(vec![
        Some(FixtureEntry::more(vec![json!("A"), json!("B")])),
        Some(FixtureEntry::failure("flaky", Some(Page::last(vec![json!("C")])))),
    ])
    .with_latency_ms(1);
    let session = fixture.into_session();

    let first: Vec<_> = session.results().collect().await;
    assert_eq!(first.len(), 3);
    assert!(first[2].is_err());
    assert!(!session.is_finished());

    let rest: Vec<_> = session.results().map(Result::unwrap).collect().await;
    assert_eq!(rest, vec![json!("C")]);
    assert!(session.is_finished());
    assert_eq!(session.source().fetched(), vec![0, 1, 1]);
}

#[tokio::test]
async fn test_explicit_exhaustion_ends_session() {
    let fixture = load_fixture_from_str(
        r#"{"pages": [{"items": ["A"], "has_more": true}, {"exhausted": true}, {"items": ["never"]}]}"#,
        FixtureFormat::Json,
    )
    .unwrap();
    let session = fixture.into_session();

    assert_eq!(
        session.next_page_or_null().await.unwrap(),
        Some(vec![json!("A")])
    );
    assert_eq!(session.next_page_or_null().await.unwrap(), None);
    assert!(session.is_finished());

    assert_eq!(session.next_page_or_null().await.unwrap(), None);
    assert_eq!(session.source().fetched(), vec![0, 1]);
}
