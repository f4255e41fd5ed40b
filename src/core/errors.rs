//! Error types
//!
//! Only conditions that are real failures live here. "No matches" from the
//! filter, a full field buffer and a failed nmcli call are ordinary outcomes
//! and are reported as values by their owners.

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias.
pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("malformed contact storage at {path}: {details}")]
    MalformedStorage { path: PathBuf, details: String },

    #[error("no contact named {nickname:?}")]
    NotFound { nickname: String },

    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failure: {details}")]
    Serialization { details: String },

    #[error("terminal failure: {details}")]
    Terminal { details: String },
}

impl PanelError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PanelError::Io {
            path: path.into(),
            source,
        }
    }
}
