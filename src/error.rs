//! Error types for note resolution, registry persistence and command execution.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by storage primitives (filesystem and the JSON list store).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Command-level error surfaced to the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No file under the cursor and no explicit path was given.
    #[error("Nothing is selected.")]
    NothingSelected,

    #[error("No notes directory at {}", .0.display())]
    NoNotesDirectory(PathBuf),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Editor error: {0}")]
    EditorError(String),

    #[error("Input error: {0}")]
    InputError(String),
}

impl ApiError {
    /// Wrap an I/O failure that happened while touching `path`.
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        ApiError::StorageError(StorageError::IoError(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.display(), err),
        )))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ApiError {
    fn from(err: dialoguer::Error) -> Self {
        ApiError::InputError(err.to_string())
    }
}
