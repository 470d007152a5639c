//! Notes directory registry and its JSON persistence.

pub mod contract;
mod directory;
pub mod json_store;

pub use contract::ListStore;
pub use directory::{registry_key, NoteDirRegistry};
pub use json_store::JsonListStore;
