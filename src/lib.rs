//! dirnotes: markdown notes attached to files and directories
//!
//! Notes live in a `.notes` folder next to what they describe, or in the
//! active project's `.notes` folder when one is set. Every notes folder ever
//! created is kept in a persisted registry used for navigation and search.

pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod notes;
pub mod registry;
pub mod search;
pub mod tooling;
