//! Environment variable source: DIRNOTES__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
///
/// `DIRNOTES__EDITOR__COMMAND=nvim` sets `editor.command`. Single-underscore
/// variables such as `DIRNOTES_LOG` belong to logging and are not picked up.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("DIRNOTES")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
