//! Note command service: one entry point per note command.
//!
//! Owns the note workflows; the CLI parses arguments, calls one method per
//! command, and formats the result.

use crate::config::NotesConfig;
use crate::error::ApiError;
use crate::host::{Host, StatusLine};
use crate::notes::{touch, NoteLocator, ProjectMarker, Selection};
use crate::registry::{registry_key, NoteDirRegistry};
use crate::search::providers::count_entries;
use crate::search::{DirectoryListProvider, GlobalNoteProvider, NoteListProvider, SearchProvider};
use std::path::{Path, PathBuf};

/// Result of the open command.
#[derive(Debug, Clone)]
pub struct OpenResult {
    pub note_path: PathBuf,
    pub notes_dir: PathBuf,
    pub created_dir: bool,
    pub editor: String,
}

/// Result of the remove command.
#[derive(Debug, Clone)]
pub struct RemoveResult {
    pub note_path: PathBuf,
    /// The notes directory was left empty and has been deleted and unregistered.
    pub removed_dir: bool,
}

/// Result of the edit command.
#[derive(Debug, Clone)]
pub struct EditResult {
    pub note_path: PathBuf,
    pub editor: String,
}

/// Clears the status line when a pick ends, however it ends.
struct StatusGuard<'a>(&'a dyn StatusLine);

impl<'a> StatusGuard<'a> {
    fn show(status: &'a dyn StatusLine, message: &str) -> Self {
        status.set(message);
        Self(status)
    }
}

impl Drop for StatusGuard<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

pub struct NoteCommandService<'a> {
    config: &'a NotesConfig,
    registry: &'a NoteDirRegistry,
    host: &'a Host,
}

impl<'a> NoteCommandService<'a> {
    pub fn new(config: &'a NotesConfig, registry: &'a NoteDirRegistry, host: &'a Host) -> Self {
        Self {
            config,
            registry,
            host,
        }
    }

    /// Open (creating if needed) the note for the selection and launch the editor on it.
    pub fn open(
        &self,
        selection: &Selection,
        override_path: Option<&Path>,
    ) -> Result<OpenResult, ApiError> {
        let marker = ProjectMarker::new(self.config.notes.resolve_project_marker()?);
        let locator = NoteLocator::new(&self.config.notes, marker, self.registry);
        let resolved = locator.resolve(selection, override_path)?;

        touch(&resolved.note_path)?;
        let launcher = self.host.launchers.select()?;
        launcher.open(&resolved.note_path)?;

        Ok(OpenResult {
            note_path: resolved.note_path,
            notes_dir: resolved.notes_dir,
            created_dir: resolved.created,
            editor: launcher.name().to_string(),
        })
    }

    /// Pick a registered notes directory. None when the user cancels.
    pub fn goto(&self) -> Result<Option<String>, ApiError> {
        let provider = DirectoryListProvider::from_registry(self.registry)?;
        let _status = StatusGuard::show(self.host.status.as_ref(), provider.title());
        let pick = self.host.picker.pick(&provider)?;
        Ok(pick.map(|pick| pick.label))
    }

    /// Pick and delete a note in `<open_dir>/<notes dir>`, removing the
    /// directory and its registry entry once it is empty.
    pub fn remove(&self, open_dir: &Path) -> Result<Option<RemoveResult>, ApiError> {
        let notes_dir = open_dir.join(&self.config.notes.dir_name);
        let _status = StatusGuard::show(self.host.status.as_ref(), "Delete Note...");
        let provider = NoteListProvider::from_dir(&notes_dir)?;
        let Some(pick) = self.host.picker.pick(&provider)? else {
            return Ok(None);
        };

        let note_path = notes_dir.join(&pick.label);
        delete_entry(&note_path)?;
        tracing::info!(note = %note_path.display(), "Deleted note");

        let removed_dir = count_entries(&notes_dir)? == 0;
        if removed_dir {
            std::fs::remove_dir(&notes_dir).map_err(|e| ApiError::io(&notes_dir, e))?;
            self.registry.remove(&registry_key(&notes_dir))?;
            tracing::info!(dir = %notes_dir.display(), "Removed empty notes directory");
        }

        Ok(Some(RemoveResult {
            note_path,
            removed_dir,
        }))
    }

    /// Pick any note from any registered directory and launch the editor on it.
    pub fn edit(&self) -> Result<Option<EditResult>, ApiError> {
        let _status = StatusGuard::show(self.host.status.as_ref(), "Edit Note...");
        let provider = GlobalNoteProvider::from_registry(self.registry)?;
        tracing::debug!(notes = provider.len(), "Collected notes for edit");
        let Some(pick) = self.host.picker.pick(&provider)? else {
            return Ok(None);
        };

        let note_path = PathBuf::from(pick.label);
        let launcher = self.host.launchers.select()?;
        launcher.open(&note_path)?;
        Ok(Some(EditResult {
            note_path,
            editor: launcher.name().to_string(),
        }))
    }

    /// Registered notes directories with whether each still exists.
    pub fn directories(&self) -> Result<Vec<(String, bool)>, ApiError> {
        Ok(self
            .registry
            .list()?
            .into_iter()
            .map(|dir| {
                let exists = Path::new(&dir).is_dir();
                (dir, exists)
            })
            .collect())
    }
}

fn delete_entry(path: &Path) -> Result<(), ApiError> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| ApiError::io(path, e))
}
