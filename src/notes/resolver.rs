//! Note location resolution.
//!
//! A note for `subject` lives at `<notes dir>/<basename(subject)>.<ext>`. The
//! notes directory is `<anchor>/<dir_name>` unless the anchor sits inside the
//! active project, in which case all notes are centralized under
//! `<project root>/<dir_name>`.

use crate::config::{NotesSection, ProjectScope};
use crate::error::{ApiError, StorageError};
use crate::notes::marker::ProjectMarker;
use crate::registry::{registry_key, NoteDirRegistry};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What the user is looking at: the open directory and, optionally, the entry under the cursor.
#[derive(Debug, Clone)]
pub struct Selection {
    pub open_dir: PathBuf,
    pub under_cursor: Option<PathBuf>,
}

impl Selection {
    pub fn new(open_dir: impl Into<PathBuf>) -> Self {
        Self {
            open_dir: open_dir.into(),
            under_cursor: None,
        }
    }

    pub fn with_cursor(mut self, entry: impl Into<PathBuf>) -> Self {
        self.under_cursor = Some(entry.into());
        self
    }
}

/// Outcome of [`NoteLocator::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNote {
    pub note_path: PathBuf,
    pub notes_dir: PathBuf,
    /// The notes directory did not exist and was created (and registered) by this call.
    pub created: bool,
    /// Project root that captured the note, when the project override applied.
    pub project_root: Option<PathBuf>,
}

pub struct NoteLocator<'a> {
    layout: &'a NotesSection,
    marker: ProjectMarker,
    registry: &'a NoteDirRegistry,
}

impl<'a> NoteLocator<'a> {
    pub fn new(layout: &'a NotesSection, marker: ProjectMarker, registry: &'a NoteDirRegistry) -> Self {
        Self {
            layout,
            marker,
            registry,
        }
    }

    /// Compute the notes directory and note path, creating and registering
    /// the directory when it does not exist yet.
    ///
    /// `override_path` replaces the entry under the cursor and moves the
    /// anchor to its parent directory. With neither available this fails with
    /// [`ApiError::NothingSelected`] before touching storage.
    pub fn resolve(
        &self,
        selection: &Selection,
        override_path: Option<&Path>,
    ) -> Result<ResolvedNote, ApiError> {
        let (subject, anchor) = match (override_path, selection.under_cursor.as_deref()) {
            (Some(path), _) => {
                let parent = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(selection.open_dir.as_path());
                (path, parent)
            }
            (None, Some(entry)) => (entry, selection.open_dir.as_path()),
            (None, None) => return Err(ApiError::NothingSelected),
        };

        let subject_name = subject.file_name().ok_or_else(|| {
            StorageError::InvalidPath(format!("{} has no file name", subject.display()))
        })?;

        let project_root = self.marker.read()?.map(|root| canonical_or_raw(&root));
        let candidate = anchor.join(&self.layout.dir_name);
        let (notes_dir, project_root) = match project_root {
            Some(root) if self.within_project(&candidate, &root) => {
                (root.join(&self.layout.dir_name), Some(root))
            }
            _ => (candidate, None),
        };

        let created = if notes_dir.exists() {
            false
        } else {
            std::fs::create_dir(&notes_dir).map_err(|e| ApiError::io(&notes_dir, e))?;
            tracing::info!(dir = %notes_dir.display(), "Created notes directory");
            self.registry.add(&registry_key(&notes_dir))?;
            true
        };

        let mut file_name = OsString::from(subject_name);
        file_name.push(".");
        file_name.push(&self.layout.extension);
        let note_path = notes_dir.join(file_name);

        tracing::debug!(
            subject = %subject.display(),
            note = %note_path.display(),
            project = project_root.is_some(),
            "Resolved note location"
        );
        Ok(ResolvedNote {
            note_path,
            notes_dir,
            created,
            project_root,
        })
    }

    fn within_project(&self, candidate: &Path, root: &Path) -> bool {
        match self.layout.project_scope {
            ProjectScope::Ancestor => candidate.starts_with(root),
            ProjectScope::Substring => candidate
                .to_string_lossy()
                .contains(root.to_string_lossy().as_ref()),
        }
    }
}

/// Create `path` as an empty file if it does not exist; leave existing content alone.
pub fn touch(path: &Path) -> Result<(), ApiError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| ApiError::io(path, e))
}

fn canonical_or_raw(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
