//! Configuration
//!
//! Layered configuration for dirnotes: built-in defaults, the global
//! `config.toml`, then `DIRNOTES__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage_paths;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use storage_paths::StorageConfig;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a candidate notes directory is tested against the active project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectScope {
    /// Candidate lies under the project root, compared component by component.
    #[default]
    Ancestor,
    /// Candidate's display string contains the project root string.
    Substring,
}

fn default_dir_name() -> String {
    ".notes".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

/// Note placement settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesSection {
    /// Name of the per-directory notes folder
    #[serde(default = "default_dir_name")]
    pub dir_name: String,

    /// Extension appended to the subject's file name
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Marker file naming the active project root; None means `~/.currentprojectdir`
    #[serde(default)]
    pub project_marker: Option<PathBuf>,

    #[serde(default)]
    pub project_scope: ProjectScope,
}

impl NotesSection {
    pub fn resolve_project_marker(&self) -> Result<PathBuf, ApiError> {
        match &self.project_marker {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => xdg::default_project_marker(),
        }
    }
}

impl Default for NotesSection {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
            extension: default_extension(),
            project_marker: None,
            project_scope: ProjectScope::default(),
        }
    }
}

fn default_extension_name() -> String {
    "OpenWithEditor".to_string()
}

/// Editor launcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor command line; None falls back to $VISUAL, $EDITOR, then `vi`
    #[serde(default)]
    pub command: Option<String>,

    /// Launcher used instead of `command` when `extension` is installed
    #[serde(default)]
    pub alternate_command: Option<String>,

    /// Extension whose presence selects `alternate_command`
    #[serde(default = "default_extension_name")]
    pub extension: String,

    /// Directory probed for `extension`; None means `$XDG_CONFIG_HOME/dirnotes/extensions`
    #[serde(default)]
    pub extensions_dir: Option<PathBuf>,
}

impl EditorConfig {
    pub fn resolve_extensions_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.extensions_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
            _ => xdg::extensions_dir(),
        }
    }

    /// Primary editor command line.
    pub fn resolve_command(&self) -> String {
        if let Some(cmd) = self.command.as_ref().filter(|c| !c.trim().is_empty()) {
            return cmd.clone();
        }
        ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "vi".to_string())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: None,
            alternate_command: None,
            extension: default_extension_name(),
            extensions_dir: None,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub notes: NotesSection,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
