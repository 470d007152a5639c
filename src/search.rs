//! Fuzzy search over notes directories and note files.

pub mod matcher;
pub mod providers;

pub use matcher::contains_chars;
pub use providers::{
    DirectoryListProvider, GlobalNoteProvider, NoteListProvider, SearchItem, SearchProvider,
};
