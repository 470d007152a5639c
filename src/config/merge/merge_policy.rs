//! Built-in defaults forming the lowest-precedence layer.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("notes.dir_name", ".notes")?
        .set_default("notes.extension", "md")?
        .set_default("notes.project_scope", "ancestor")?
        .set_default("storage.registry_key", "notesdir")?
        .set_default("editor.extension", "OpenWithEditor")
}
