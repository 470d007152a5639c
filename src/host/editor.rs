//! Editor launchers.
//!
//! Two launcher command lines may be configured. The alternate one is used
//! only when its extension is installed in the extensions directory; the
//! choice is made once per command through [`LauncherSelector::select`].

use crate::config::EditorConfig;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait EditorLauncher {
    /// Command line used for display and logging.
    fn name(&self) -> &str;

    /// Open `note` and wait for the editor to exit.
    fn open(&self, note: &Path) -> Result<(), ApiError>;
}

pub trait LauncherSelector {
    fn select(&self) -> Result<Box<dyn EditorLauncher>, ApiError>;
}

/// Runs `<program> <args...> <note>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLauncher {
    command_line: String,
    program: String,
    args: Vec<String>,
}

impl CommandLauncher {
    pub fn parse(command_line: &str) -> Result<Self, ApiError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ApiError::EditorError("Editor command is empty".to_string()))?;
        Ok(Self {
            command_line: command_line.trim().to_string(),
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl EditorLauncher for CommandLauncher {
    fn name(&self) -> &str {
        &self.command_line
    }

    fn open(&self, note: &Path) -> Result<(), ApiError> {
        tracing::info!(editor = %self.command_line, note = %note.display(), "Launching editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(note)
            .status()
            .map_err(|e| {
                ApiError::EditorError(format!("Failed to open editor {}: {}", self.program, e))
            })?;

        if !status.success() {
            return Err(ApiError::EditorError(format!(
                "Editor exited with non-zero status: {}",
                status
            )));
        }
        Ok(())
    }
}

/// Chooses between the primary and alternate launcher by probing for an extension.
#[derive(Debug, Clone)]
pub struct ExtensionLauncherSelector {
    primary: String,
    alternate: Option<String>,
    extension: String,
    extensions_dir: PathBuf,
}

impl ExtensionLauncherSelector {
    pub fn new(
        primary: impl Into<String>,
        alternate: Option<String>,
        extension: impl Into<String>,
        extensions_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            primary: primary.into(),
            alternate,
            extension: extension.into(),
            extensions_dir: extensions_dir.into(),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            config.resolve_command(),
            config
                .alternate_command
                .clone()
                .filter(|cmd| !cmd.trim().is_empty()),
            config.extension.clone(),
            config.resolve_extensions_dir()?,
        ))
    }

    /// Whether the extension is installed (present as an entry of the extensions directory).
    pub fn extension_present(&self) -> bool {
        !self.extension.is_empty() && self.extensions_dir.join(&self.extension).exists()
    }

    fn chosen_command(&self) -> &str {
        match &self.alternate {
            Some(alternate) if self.extension_present() => alternate,
            _ => &self.primary,
        }
    }
}

impl LauncherSelector for ExtensionLauncherSelector {
    fn select(&self) -> Result<Box<dyn EditorLauncher>, ApiError> {
        let command = self.chosen_command();
        tracing::debug!(
            extension = %self.extension,
            present = self.extension_present(),
            command,
            "Selected editor launcher"
        );
        Ok(Box::new(CommandLauncher::parse(command)?))
    }
}
