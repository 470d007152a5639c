//! Project marker: a file naming the active project's root directory.

use crate::error::{ApiError, StorageError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectMarker {
    path: PathBuf,
}

impl ProjectMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Active project root, if the marker file exists and names one.
    ///
    /// Surrounding whitespace (a trailing newline from `echo`) is ignored.
    pub fn read(&self) -> Result<Option<PathBuf>, ApiError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::StorageError(StorageError::IoError(e))),
        };
        let root = content.trim();
        if root.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathBuf::from(root)))
    }
}
