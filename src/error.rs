// src/error.rs
//! Startup-time failures. Classification itself never fails; everything that can
//! go wrong happens while loading the catalogue, overrides, rules or config.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalogue is missing a {0} column")]
    MissingColumn(&'static str),

    #[error("duplicate taxonomy code `{0}`")]
    DuplicateCode(String),

    #[error("catalogue contains no usable rows")]
    EmptyCatalogue,

    #[error("rule `{id}` has an invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("override table: {0}")]
    Overrides(String),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigurationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
