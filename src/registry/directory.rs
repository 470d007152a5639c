//! Registry of every notes directory ever created.

use crate::error::StorageError;
use crate::registry::contract::ListStore;
use parking_lot::Mutex;
use std::path::{Path, MAIN_SEPARATOR};
use std::sync::Arc;

/// Canonical registry entry for a notes directory: its path with a trailing separator.
///
/// Both registration and removal go through this so the two always agree.
pub fn registry_key(notes_dir: &Path) -> String {
    let mut key = notes_dir.to_string_lossy().into_owned();
    if !key.ends_with(MAIN_SEPARATOR) && !key.ends_with('/') {
        key.push(MAIN_SEPARATOR);
    }
    key
}

/// Ordered, duplicate-free list of notes directories.
///
/// Entries are loaded from the store on first access and the full list is
/// written back after every mutation.
pub struct NoteDirRegistry {
    store: Arc<dyn ListStore>,
    key: String,
    entries: Mutex<Option<Vec<String>>>,
}

impl NoteDirRegistry {
    pub fn new(store: Arc<dyn ListStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            entries: Mutex::new(None),
        }
    }

    /// All known notes directories, in insertion order.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut guard = self.entries.lock();
        Ok(self.loaded(&mut guard)?.clone())
    }

    /// Append `dir` unless already present. Returns whether the list changed.
    pub fn add(&self, dir: &str) -> Result<bool, StorageError> {
        let mut guard = self.entries.lock();
        let entries = self.loaded(&mut guard)?;
        if entries.iter().any(|entry| entry == dir) {
            return Ok(false);
        }
        entries.push(dir.to_string());
        self.store.save_list(&self.key, entries)?;
        tracing::info!(dir, "Registered notes directory");
        Ok(true)
    }

    /// Remove the first entry equal to `dir`. Absent entries are not an error;
    /// the list is persisted either way. Returns whether an entry was removed.
    pub fn remove(&self, dir: &str) -> Result<bool, StorageError> {
        let mut guard = self.entries.lock();
        let entries = self.loaded(&mut guard)?;
        let removed = match entries.iter().position(|entry| entry == dir) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        };
        self.store.save_list(&self.key, entries)?;
        if removed {
            tracing::info!(dir, "Unregistered notes directory");
        } else {
            tracing::debug!(dir, "Notes directory was not registered");
        }
        Ok(removed)
    }

    fn loaded<'a>(
        &self,
        guard: &'a mut Option<Vec<String>>,
    ) -> Result<&'a mut Vec<String>, StorageError> {
        if guard.is_none() {
            let mut loaded = self.store.load_list(&self.key, Vec::new())?;
            // A hand-edited file may carry duplicates; keep first occurrences.
            let mut seen = std::collections::HashSet::new();
            loaded.retain(|entry| seen.insert(entry.clone()));
            tracing::debug!(key = %self.key, entries = loaded.len(), "Loaded notes directory registry");
            *guard = Some(loaded);
        }
        Ok(guard.get_or_insert_with(Vec::new))
    }
}
