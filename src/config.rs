//! Session configuration
//!
//! Settings that shape a single search session. Loadable from fixture files
//! (JSON or YAML) through serde.

use crate::error::{Error, Result};
use crate::types::EXHAUSTED_PAGE;
use serde::{Deserialize, Serialize};

/// Configuration for one search session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// First page index to fetch (usually 0 or 1)
    #[serde(default)]
    pub initial_page: u32,

    /// Name attached to log events of this session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SessionConfig {
    /// Create a default config (starts at page 0, no label)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first page index
    #[must_use]
    pub fn with_initial_page(mut self, page: u32) -> Self {
        self.initial_page = page;
        self
    }

    /// Set the log label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label used in log events
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("search")
    }

    /// Check the config for values a session cannot start from
    ///
    /// Starting at the reserved index is not rejected by the session itself
    /// (it simply begins finished), but a config asking for it is almost
    /// certainly a mistake.
    pub fn validate(&self) -> Result<()> {
        if self.initial_page == EXHAUSTED_PAGE {
            return Err(Error::invalid_value(
                "initial_page",
                format!("{EXHAUSTED_PAGE} is reserved for exhausted sessions"),
            ));
        }
        if self.label.as_deref().is_some_and(str::is_empty) {
            return Err(Error::invalid_value("label", "must not be empty"));
        }
        Ok(())
    }
}
