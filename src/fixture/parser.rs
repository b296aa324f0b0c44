//! Fixture file parser
//!
//! Loads fixtures from JSON or YAML files. The format is picked from the file
//! extension (`.yaml`/`.yml` for YAML, anything else for JSON).

use super::types::Fixture;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Fixture file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl FixtureFormat {
    /// Guess the format from a file path
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Load and validate a fixture file
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Fixture> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    load_fixture_from_str(&content, FixtureFormat::from_path(path))
}

/// Load and validate a fixture from a string
pub fn load_fixture_from_str(content: &str, format: FixtureFormat) -> Result<Fixture> {
    let fixture: Fixture = match format {
        FixtureFormat::Json => serde_json::from_str(content)?,
        FixtureFormat::Yaml => serde_yaml::from_str(content)?,
    };

    fixture.validate()?;
    Ok(fixture)
}
