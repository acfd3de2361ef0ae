//! Helpers shared across CLI commands

use std::path::{Path, PathBuf};

use modgen_core::{CONFIG_FILE_NAME, GeneratorConfig};
use tracing::debug;

/// Load the generator configuration.
///
/// An explicit `--config` path must exist; otherwise `modgen.toml` in the
/// working directory is used when present and defaults apply when it is not.
pub fn load_config(explicit: Option<&Path>) -> Result<GeneratorConfig, String> {
    let config = match explicit {
        Some(path) => GeneratorConfig::from_file(path),
        None => GeneratorConfig::from_file_or_default(&PathBuf::from(CONFIG_FILE_NAME)),
    }
    .map_err(|err| err.to_string())?;
    debug!(?config, "Loaded configuration.");
    Ok(config)
}
