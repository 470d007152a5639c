//! StorageConfig and path resolution for the persisted JSON lists.

use crate::config::xdg;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_registry_key() -> String {
    "notesdir".to_string()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<key>.json` lists; None means `$XDG_DATA_HOME/dirnotes`
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Key under which the notes directory registry is stored
    #[serde(default = "default_registry_key")]
    pub registry_key: String,
}

impl StorageConfig {
    /// Resolve the data directory to an actual filesystem location.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.data_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
            _ => xdg::data_dir(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            registry_key: default_registry_key(),
        }
    }
}
