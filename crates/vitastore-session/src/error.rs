//! # Session Errors
//!
//! Errors from the adapters that touch the outside world. The managers in
//! vitastore-core never fail; everything here happens while a session is
//! being set up (reading config, string tables, the catalog).

use std::path::PathBuf;

use thiserror::Error;
use vitastore_core::{CoreError, ValidationError};

#[derive(Debug, Error)]
pub enum SessionError {
    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON file (string table, catalog) could not be parsed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML config file could not be parsed.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A config value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
