//! Logging System
//!
//! Structured logging using the `tracing` crate. Log level, format and
//! destination come from CLI flags, `DIRNOTES_LOG*` environment variables,
//! or the `[logging]` config section, in that order.
//!
//! The default destination is a file in the platform state directory so log
//! lines never land in the middle of an interactive picker.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Resolve the log file path with precedence: CLI, DIRNOTES_LOG_FILE env, config file, default.
fn log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    env: EnvLookup<'_>,
) -> Result<PathBuf, ApiError> {
    if let Some(p) = cli_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    if let Some(env_path) = env("DIRNOTES_LOG_FILE") {
        return Ok(PathBuf::from(env_path));
    }
    if let Some(p) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    default_log_file_path()
}

type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn default_log_file_path() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "dirnotes", "dirnotes").ok_or_else(|| {
        ApiError::ConfigError(
            "Could not determine platform state directory for log file".to_string(),
        )
    })?;
    // macOS and Windows have no state dir; fall back to the local data dir there.
    let base = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir());
    Ok(base.join("dirnotes.log"))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use runtime default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Logging values given on the command line.
///
/// These outrank both the `DIRNOTES_LOG*` environment and [`LoggingConfig`].
#[derive(Debug, Clone, Default)]
pub struct LogOverrides {
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (`overrides`)
/// 2. Environment variables (DIRNOTES_LOG, DIRNOTES_LOG_FORMAT, ...)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(
    config: Option<&LoggingConfig>,
    overrides: Option<&LogOverrides>,
) -> Result<(), ApiError> {
    if config.map(|c| !c.enabled).unwrap_or(false) {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .init();
        return Ok(());
    }

    let env: EnvLookup<'_> = &process_env;
    let filter = build_env_filter(config, overrides, env)?;
    let format = determine_format(config, overrides, env)?;
    let output = determine_output(config, overrides, env)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && !output.file;

    let writer = if output.file {
        let log_file = log_file_path(
            overrides.and_then(|o| o.file.clone()),
            config.and_then(|c| c.file.clone()),
            env,
        )?;
        let file = open_log_file(&log_file)?;
        if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        }
    } else if output.stdout && output.stderr {
        BoxMakeWriter::new(std::io::stdout.and(std::io::stderr))
    } else if output.stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };

    let base = fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339());
    let subscriber = Registry::default().with(filter);
    if format == LogFormat::Json {
        subscriber.with(base.json().with_writer(writer)).init();
    } else {
        subscriber
            .with(base.with_ansi(use_color).with_writer(writer))
            .init();
    }

    Ok(())
}

fn open_log_file(log_file: &std::path::Path) -> Result<std::sync::Mutex<std::fs::File>, ApiError> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
        })?;
    Ok(std::sync::Mutex::new(file))
}

/// Build the level filter from CLI, environment or config.
fn build_env_filter(
    config: Option<&LoggingConfig>,
    overrides: Option<&LogOverrides>,
    env: EnvLookup<'_>,
) -> Result<EnvFilter, ApiError> {
    let directives = filter_directives(config, overrides, env);
    EnvFilter::try_new(&directives)
        .map_err(|e| ApiError::ConfigError(format!("Invalid log filter {}: {}", directives, e)))
}

/// Comma-separated filter directives. `DIRNOTES_LOG` is used verbatim unless
/// a level was given on the command line.
fn filter_directives(
    config: Option<&LoggingConfig>,
    overrides: Option<&LogOverrides>,
    env: EnvLookup<'_>,
) -> String {
    let cli_level = overrides.and_then(|o| o.level.as_deref());
    if cli_level.is_none() {
        if let Some(directives) = env("DIRNOTES_LOG") {
            return directives;
        }
    }

    let level = cli_level
        .or_else(|| config.map(|c| c.level.as_str()))
        .unwrap_or("info");
    if level == "off" {
        return "off".to_string();
    }

    let mut directives = vec![level.to_string()];
    if let Some(config) = config {
        let mut modules: Vec<_> = config.modules.iter().collect();
        modules.sort();
        directives.extend(
            modules
                .into_iter()
                .map(|(module, module_level)| format!("{}={}", module, module_level)),
        );
    }
    if let Some(modules_str) = env("DIRNOTES_LOG_MODULES") {
        directives.extend(modules_str.split(',').filter_map(|directive| {
            let (module, module_level) = directive.split_once('=')?;
            Some(format!("{}={}", module.trim(), module_level.trim()))
        }));
    }
    directives.join(",")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<LogFormat, ApiError> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Determine output format from CLI, environment or config
fn determine_format(
    config: Option<&LoggingConfig>,
    overrides: Option<&LogOverrides>,
    env: EnvLookup<'_>,
) -> Result<LogFormat, ApiError> {
    if let Some(format) = overrides.and_then(|o| o.format.as_deref()) {
        return parse_format(format);
    }
    if let Some(format) = env("DIRNOTES_LOG_FORMAT") {
        if let Ok(parsed) = parse_format(&format) {
            return Ok(parsed);
        }
    }
    parse_format(config.map(|c| c.format.as_str()).unwrap_or("text"))
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Determine output destinations from CLI, environment or config
fn determine_output(
    config: Option<&LoggingConfig>,
    overrides: Option<&LogOverrides>,
    env: EnvLookup<'_>,
) -> Result<OutputDestinations, ApiError> {
    if let Some(output) = overrides.and_then(|o| o.output.as_deref()) {
        return parse_output_destinations(output);
    }
    if let Some(output) = env("DIRNOTES_LOG_OUTPUT") {
        return parse_output_destinations(&output);
    }
    parse_output_destinations(config.map(|c| c.output.as_str()).unwrap_or("file"))
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ApiError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(ApiError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
