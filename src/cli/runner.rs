//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result};
use crate::fixture::{load_fixture, FixtureSource};
use crate::session::PageBasedSearchSession;
use futures::StreamExt;
use serde_json::{json, Value};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, warn};

type FixtureSession = PageBasedSearchSession<FixtureSource>;

/// What a `pull` or `stream` run did to its session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Pages handed to the caller; only known when pulling by hand
    pub pages: Option<usize>,
    /// Items handed to the caller
    pub items: usize,
    /// Was the session finished at the end of the run?
    pub finished: bool,
    /// Every page index the source was asked for, retries included
    pub fetched: Vec<u32>,
}

impl RunSummary {
    fn collect(session: &FixtureSession, pages: Option<usize>, items: usize) -> Self {
        Self {
            pages,
            items,
            finished: session.is_finished(),
            fetched: session.source().fetched(),
        }
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        self.execute().await.map(|_| ())
    }

    /// Run the CLI command and report what it did
    ///
    /// `validate` does not open a session and reports `None`.
    pub async fn execute(&self) -> Result<Option<RunSummary>> {
        match &self.cli.command {
            Commands::Pull {
                fixture,
                max_pages,
                retries,
            } => self.pull(fixture, *max_pages, *retries).await.map(Some),
            Commands::Stream {
                fixture,
                consumers,
                limit,
            } => self.stream(fixture, *consumers, *limit).await.map(Some),
            Commands::Validate { fixture } => self.validate(fixture).map(|()| None),
        }
    }

    /// Load a fixture and open a session over it
    fn open_session(&self, path: &Path) -> Result<FixtureSession> {
        let fixture = load_fixture(path)?;
        info!(
            "Loaded fixture '{}' ({} scripted pages)",
            path.display(),
            fixture.pages.len()
        );
        Ok(fixture.into_session())
    }

    /// Pull pages by hand
    async fn pull(
        &self,
        path: &Path,
        max_pages: Option<usize>,
        retries: u32,
    ) -> Result<RunSummary> {
        let session = self.open_session(path)?;
        let mut pages = 0usize;
        let mut items = 0usize;

        while max_pages.map_or(true, |max| pages < max) {
            let Some(index) = session.current_page().await else {
                break;
            };
            let Some(page) = pull_with_retries(&session, retries).await? else {
                break;
            };

            pages += 1;
            items += page.len();
            self.emit(
                &json!({ "type": "page", "page": index, "items": page }),
                &format!("page {index}: {}", render_items(&page)),
            );
        }

        let summary = RunSummary::collect(&session, Some(pages), items);
        self.emit_summary(&summary);
        Ok(summary)
    }

    /// Consume the item stream from `consumers` concurrent tasks
    async fn stream(
        &self,
        path: &Path,
        consumers: usize,
        limit: Option<usize>,
    ) -> Result<RunSummary> {
        if consumers == 0 {
            return Err(Error::invalid_value("consumers", "must be at least 1"));
        }

        let session = self.open_session(path)?;
        let (tx, mut rx) = mpsc::unbounded_channel();

        for consumer in 0..consumers {
            let session = session.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut results = Box::pin(session.results());
                while let Some(item) = results.next().await {
                    if tx.send((consumer, item)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        let mut items = 0usize;
        let mut first_error = None;

        while let Some((consumer, item)) = rx.recv().await {
            match item {
                Ok(value) => {
                    items += 1;
                    self.emit(
                        &json!({ "type": "item", "consumer": consumer, "item": value }),
                        &format!("[{consumer}] {value}"),
                    );
                    if limit.is_some_and(|limit| items >= limit) {
                        info!("Item limit reached, closing session");
                        session.finish().await;
                        break;
                    }
                }
                Err(e) => {
                    warn!("Consumer {} stopped: {}", consumer, e);
                    self.emit(
                        &json!({ "type": "error", "consumer": consumer, "message": e.to_string() }),
                        &format!("[{consumer}] error: {e}"),
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        let summary = RunSummary::collect(&session, None, items);
        self.emit_summary(&summary);

        match first_error {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }

    /// Validate a fixture file
    fn validate(&self, path: &Path) -> Result<()> {
        let fixture = load_fixture(path)?;
        self.emit(
            &json!({
                "type": "valid",
                "pages": fixture.pages.len(),
                "items": fixture.item_count(),
            }),
            &format!(
                "Fixture is valid: {} pages, {} items",
                fixture.pages.len(),
                fixture.item_count()
            ),
        );
        Ok(())
    }

    fn emit_summary(&self, summary: &RunSummary) {
        let RunSummary {
            pages,
            items,
            finished,
            fetched,
        } = summary;

        // Streams only see items, so report how often the source was asked
        let (message, counted) = match pages {
            Some(pages) => (
                json!({
                    "type": "summary",
                    "pages": pages,
                    "items": items,
                    "finished": finished,
                    "fetched": fetched,
                }),
                format!("{pages} pages"),
            ),
            None => (
                json!({
                    "type": "summary",
                    "fetches": fetched.len(),
                    "items": items,
                    "finished": finished,
                    "fetched": fetched,
                }),
                format!("{} fetches", fetched.len()),
            ),
        };
        self.emit(
            &message,
            &format!("{counted}, {items} items, finished: {finished}"),
        );
    }

    fn emit(&self, message: &Value, pretty: &str) {
        match self.cli.format {
            OutputFormat::Json => println!("{message}"),
            OutputFormat::Pretty => println!("{pretty}"),
        }
    }
}

/// Pull one page, retrying retryable failures at the same page index
async fn pull_with_retries(
    session: &FixtureSession,
    retries: u32,
) -> Result<Option<Vec<Value>>> {
    let mut attempt = 0;
    loop {
        match session.next_page_or_null().await {
            Ok(page) => return Ok(page),
            Err(e) if e.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!("{}, retry {}/{}", e, attempt, retries);
            }
            Err(e) => return Err(e),
        }
    }
}

fn render_items(items: &[Value]) -> String {
    items
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
