//! XDG Base Directory lookups for dirnotes data, config and extensions.

use crate::error::ApiError;
use std::path::PathBuf;

const APP_DIR: &str = "dirnotes";

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Some(PathBuf::from(xdg_data_home));
        }
    }

    home_dir().map(|home| home.join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = home_dir().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(home.join(".config"))
}

/// `$HOME`, falling back to the platform lookup when the variable is unset.
pub fn home_dir() -> Option<PathBuf> {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()),
    }
}

/// Directory holding persisted JSON lists: `$XDG_DATA_HOME/dirnotes/`
pub fn data_dir() -> Result<PathBuf, ApiError> {
    let data_home = data_home().ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;
    Ok(data_home.join(APP_DIR))
}

/// Global config file: `$XDG_CONFIG_HOME/dirnotes/config.toml`
pub fn global_config_file() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

/// Extensions directory probed when choosing an editor launcher:
/// `$XDG_CONFIG_HOME/dirnotes/extensions/`
///
/// Unlike the data directory this is never created here; its absence simply
/// means no extension is installed.
pub fn extensions_dir() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join(APP_DIR).join("extensions"))
}

/// Default project marker file: `~/.currentprojectdir`
pub fn default_project_marker() -> Result<PathBuf, ApiError> {
    let home = home_dir().ok_or_else(|| {
        ApiError::ConfigError("Could not determine home directory for project marker".to_string())
    })?;
    Ok(home.join(".currentprojectdir"))
}
