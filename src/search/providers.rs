//! Candidate sources for the interactive picker.
//!
//! Each provider snapshots its candidates once and then filters them per
//! query. Filtering is lazy, restartable and yields matches in candidate order.

use crate::error::{ApiError, StorageError};
use crate::registry::NoteDirRegistry;
use crate::search::matcher::{contains_chars, normalize};
use std::path::Path;
use walkdir::WalkDir;

/// One picker row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    /// Candidate exactly as the source produced it.
    pub label: String,
    /// Matched char positions in the NFC form of `label`; None for the empty query.
    pub highlight: Option<Vec<usize>>,
}

pub trait SearchProvider {
    /// Status-line title shown while the picker is open.
    fn title(&self) -> &str;

    fn provide<'a>(&'a self, query: &str) -> Box<dyn Iterator<Item = SearchItem> + 'a>;
}

#[derive(Debug, Clone)]
struct Candidate {
    label: String,
    key: String,
}

#[derive(Debug, Clone, Default)]
struct Candidates(Vec<Candidate>);

impl Candidates {
    fn new(labels: impl IntoIterator<Item = String>) -> Self {
        Self(
            labels
                .into_iter()
                .map(|label| Candidate {
                    key: normalize(&label),
                    label,
                })
                .collect(),
        )
    }

    fn filter<'a>(&'a self, query: &str) -> Box<dyn Iterator<Item = SearchItem> + 'a> {
        let query = normalize(query);
        Box::new(self.0.iter().filter_map(move |candidate| {
            if query.is_empty() {
                return Some(SearchItem {
                    label: candidate.label.clone(),
                    highlight: None,
                });
            }
            contains_chars(&candidate.key, &query).map(|positions| SearchItem {
                label: candidate.label.clone(),
                highlight: Some(positions),
            })
        }))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Known notes directories.
pub struct DirectoryListProvider {
    candidates: Candidates,
}

impl DirectoryListProvider {
    pub fn new(directories: Vec<String>) -> Self {
        Self {
            candidates: Candidates::new(directories),
        }
    }

    pub fn from_registry(registry: &NoteDirRegistry) -> Result<Self, ApiError> {
        Ok(Self::new(registry.list()?))
    }
}

impl SearchProvider for DirectoryListProvider {
    fn title(&self) -> &str {
        "Select Note Directory"
    }

    fn provide<'a>(&'a self, query: &str) -> Box<dyn Iterator<Item = SearchItem> + 'a> {
        self.candidates.filter(query)
    }
}

/// Entries of a single notes directory, labelled by file name.
pub struct NoteListProvider {
    candidates: Candidates,
}

impl NoteListProvider {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            candidates: Candidates::new(names),
        }
    }

    pub fn from_dir(notes_dir: &Path) -> Result<Self, ApiError> {
        if !notes_dir.is_dir() {
            return Err(ApiError::NoNotesDirectory(notes_dir.to_path_buf()));
        }
        Ok(Self::new(list_entries(notes_dir)?))
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.len() == 0
    }
}

impl SearchProvider for NoteListProvider {
    fn title(&self) -> &str {
        "Delete Note..."
    }

    fn provide<'a>(&'a self, query: &str) -> Box<dyn Iterator<Item = SearchItem> + 'a> {
        self.candidates.filter(query)
    }
}

/// Every note in every registered directory, labelled by full path.
///
/// The list is flattened once when the provider is built and lives only as
/// long as the pick it serves.
pub struct GlobalNoteProvider {
    candidates: Candidates,
}

impl GlobalNoteProvider {
    pub fn new(paths: Vec<String>) -> Self {
        Self {
            candidates: Candidates::new(paths),
        }
    }

    pub fn from_registry(registry: &NoteDirRegistry) -> Result<Self, ApiError> {
        let mut paths = Vec::new();
        for dir in registry.list()? {
            let path = Path::new(&dir);
            if !path.is_dir() {
                tracing::warn!(dir = %dir, "Registered notes directory is missing; skipping");
                continue;
            }
            // Registry entries already end with a separator.
            paths.extend(list_entries(path)?.into_iter().map(|name| format!("{}{}", dir, name)));
        }
        Ok(Self::new(paths))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.len() == 0
    }
}

impl SearchProvider for GlobalNoteProvider {
    fn title(&self) -> &str {
        "Edit Note..."
    }

    fn provide<'a>(&'a self, query: &str) -> Box<dyn Iterator<Item = SearchItem> + 'a> {
        self.candidates.filter(query)
    }
}

/// Names of the immediate entries of `dir`, sorted by file name.
pub fn list_entries(dir: &Path) -> Result<Vec<String>, ApiError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| StorageError::IoError(e.into()))?;
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => {
                tracing::warn!("Skipping non UTF8 note name: {:?}", entry.path());
            }
        }
    }
    Ok(names)
}

/// Number of immediate entries in `dir`.
pub fn count_entries(dir: &Path) -> Result<usize, ApiError> {
    let mut count = 0;
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        entry.map_err(|e| StorageError::IoError(e.into()))?;
        count += 1;
    }
    Ok(count)
}
