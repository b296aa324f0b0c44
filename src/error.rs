//! Error types for search-session
//!
//! Sessions are generic over the error type of their page source and pass it
//! through untouched. This module covers everything around them: session
//! configuration, fixture loading and the scripted fixture source.

use thiserror::Error;

/// The main error type for search-session
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Fixture Errors
    // ============================================================================
    #[error("Invalid fixture: {message}")]
    Fixture { message: String },

    #[error("Fetch of page {page} failed: {message}")]
    Fetch { page: u32, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a fixture error
    pub fn fixture(message: impl Into<String>) -> Self {
        Self::Fixture {
            message: message.into(),
        }
    }

    /// Create a fetch error for a page index
    pub fn fetch(page: u32, message: impl Into<String>) -> Self {
        Self::Fetch {
            page,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Only fetch failures are; a session leaves its cursor in place after
    /// one, so pulling again asks for the same page.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Fetch { .. })
    }
}

/// Result type alias for search-session
pub type Result<T> = std::result::Result<T, Error>;
