//! CLI Tooling
//!
//! Command-line front end for the note commands. The directory passed with
//! `--dir` plays the role of the file manager's open pane and the positional
//! target is the entry under the cursor.

use crate::commands::{NoteCommandService, OpenResult, RemoveResult};
use crate::config::{ConfigLoader, NotesConfig};
use crate::error::{ApiError, StorageError};
use crate::logging::LogOverrides;
use crate::host::{ExtensionLauncherSelector, Host};
use crate::notes::Selection;
use crate::registry::{JsonListStore, NoteDirRegistry};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// dirnotes - markdown notes attached to files and directories
#[derive(Parser)]
#[command(name = "dirnotes")]
#[command(about = "Markdown notes attached to files and directories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory currently open (notes are anchored here)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Logging flags, applied ahead of the environment and config.
    pub fn log_overrides(&self) -> LogOverrides {
        LogOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }

    /// Apply flags that only adjust the loaded configuration.
    pub fn apply_display_overrides(&self, config: &mut NotesConfig) {
        if self.no_color {
            config.logging.color = false;
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open (creating if needed) the note for a file or directory
    Open {
        /// Entry under the cursor, relative to --dir
        target: Option<PathBuf>,
        /// Explicit subject; its parent directory becomes the anchor
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Pick a notes directory and print its path
    Goto,
    /// Pick a note in <dir>/.notes and delete it
    Remove,
    /// Pick any known note and open it in the editor
    Edit,
    /// List registered notes directories
    Dirs {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// CLI context holding the registry and host services for one process.
pub struct CliContext {
    open_dir: PathBuf,
    config: NotesConfig,
    registry: NoteDirRegistry,
    host: Host,
}

impl CliContext {
    /// Load configuration from an explicit file or the standard sources.
    pub fn load_config(config_path: Option<&Path>) -> Result<NotesConfig, ApiError> {
        Ok(match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        })
    }

    /// Create a new CLI context
    pub fn new(open_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(config_path.as_deref())?;
        Self::from_config(open_dir, config)
    }

    /// Create a context with terminal host services.
    pub fn from_config(open_dir: PathBuf, config: NotesConfig) -> Result<Self, ApiError> {
        let launchers = ExtensionLauncherSelector::from_config(&config.editor)?;
        let host = Host::terminal(launchers, config.logging.color);
        Self::with_host(open_dir, config, host)
    }

    /// Create a context with caller-supplied host services.
    pub fn with_host(open_dir: PathBuf, config: NotesConfig, host: Host) -> Result<Self, ApiError> {
        let open_dir = dunce::canonicalize(&open_dir).map_err(|e| ApiError::io(&open_dir, e))?;
        if !open_dir.is_dir() {
            return Err(StorageError::InvalidPath(format!(
                "Not a directory: {}",
                open_dir.display()
            ))
            .into());
        }

        let store = Arc::new(JsonListStore::new(config.storage.resolve_data_dir()?));
        let registry = NoteDirRegistry::new(store, config.storage.registry_key.clone());

        Ok(Self {
            open_dir,
            config,
            registry,
            host,
        })
    }

    pub fn registry(&self) -> &NoteDirRegistry {
        &self.registry
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), dir = %self.open_dir.display(), "Executing command");
        let service = NoteCommandService::new(&self.config, &self.registry, &self.host);
        match command {
            Commands::Open { target, path } => {
                let mut selection = Selection::new(&self.open_dir);
                if let Some(target) = target {
                    selection = selection.with_cursor(self.absolutize(target));
                }
                let override_path = path.as_deref().map(|p| self.absolutize(p));
                let result = service.open(&selection, override_path.as_deref())?;
                Ok(format_open_result(&result))
            }
            Commands::Goto => Ok(service.goto()?.unwrap_or_default()),
            Commands::Remove => Ok(match service.remove(&self.open_dir)? {
                Some(result) => format_remove_result(&result),
                None => "No note selected.".to_string(),
            }),
            Commands::Edit => Ok(match service.edit()? {
                Some(result) => format!(
                    "Edited note: {} (editor: {})",
                    result.note_path.display(),
                    result.editor
                ),
                None => "No note selected.".to_string(),
            }),
            Commands::Dirs { format } => {
                let dirs = service.directories()?;
                match format.as_str() {
                    "json" => Ok(format_dirs_json(&dirs)),
                    "text" => Ok(format_dirs_text(&dirs)),
                    other => Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
        }
    }

    /// Resolve `path` against the open directory.
    ///
    /// Only the parent is canonicalized so a symlinked entry keeps its own
    /// name instead of taking its destination's.
    fn absolutize(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.open_dir.join(path)
        };
        let normalized = normalize_lexically(&joined);
        let under_canonical_parent = normalized
            .parent()
            .zip(normalized.file_name())
            .and_then(|(parent, name)| dunce::canonicalize(parent).ok().map(|p| p.join(name)));
        under_canonical_parent.unwrap_or(normalized)
    }
}

/// Drop `.` and fold `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Open { .. } => "open",
        Commands::Goto => "goto",
        Commands::Remove => "remove",
        Commands::Edit => "edit",
        Commands::Dirs { .. } => "dirs",
    }
}

fn format_open_result(result: &OpenResult) -> String {
    let mut output = format!("Opened note: {}", result.note_path.display());
    if result.created_dir {
        output.push_str(&format!(
            "\nCreated notes directory: {}",
            result.notes_dir.display()
        ));
    }
    output
}

fn format_remove_result(result: &RemoveResult) -> String {
    let mut output = format!("Deleted note: {}", result.note_path.display());
    if result.removed_dir {
        if let Some(dir) = result.note_path.parent() {
            output.push_str(&format!("\nRemoved empty notes directory: {}", dir.display()));
        }
    }
    output
}

/// Format the registry listing as a table
fn format_dirs_text(dirs: &[(String, bool)]) -> String {
    if dirs.is_empty() {
        return "No notes directories registered.".to_string();
    }
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Notes directory", "Exists"]);
    for (dir, exists) in dirs {
        table.add_row(vec![dir.as_str(), if *exists { "yes" } else { "no" }]);
    }
    format!("{}\n\nTotal: {} directory(ies)", table, dirs.len())
}

/// Format the registry listing as JSON
fn format_dirs_json(dirs: &[(String, bool)]) -> String {
    let entries: Vec<_> = dirs
        .iter()
        .map(|(dir, exists)| json!({ "path": dir, "exists": exists }))
        .collect();
    let out = json!({ "directories": entries, "total": dirs.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
