//! JSON files under the data directory, one `<key>.json` per list.

use crate::error::StorageError;
use crate::registry::contract::ListStore;
use std::path::PathBuf;

pub struct JsonListStore {
    root: PathBuf,
}

impl JsonListStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StorageError::InvalidPath(format!(
                "Invalid list key: {:?}",
                key
            )));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl ListStore for JsonListStore {
    fn load_list(&self, key: &str, default: Vec<String>) -> Result<Vec<String>, StorageError> {
        let path = self.path_for(key)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(default),
            Err(e) => return Err(StorageError::IoError(e)),
        };
        if content.trim().is_empty() {
            return Ok(default);
        }
        serde_json::from_str(&content).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn save_list(&self, key: &str, list: &[String]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;

        let json = serde_json::to_string_pretty(list)?;
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(key, path = %path.display(), entries = list.len(), "Saved list");
        Ok(())
    }
}
