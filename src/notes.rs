//! Note placement: project marker and note location resolution.

pub mod marker;
pub mod resolver;

pub use marker::ProjectMarker;
pub use resolver::{touch, NoteLocator, ResolvedNote, Selection};
