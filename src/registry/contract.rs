use crate::error::StorageError;

/// Persistent key-value store holding lists of strings.
///
/// `save_list` overwrites the whole list stored under `key`.
pub trait ListStore: Send + Sync {
    fn load_list(&self, key: &str, default: Vec<String>) -> Result<Vec<String>, StorageError>;
    fn save_list(&self, key: &str, list: &[String]) -> Result<(), StorageError>;
}
