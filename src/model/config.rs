pub use particle_core::config::*;

use anyhow::Context;
use std::fs;
use std::path::Path;

/// Loads and validates `path`, falling back to defaults when the file does
/// not exist. A file that exists but fails to parse or validate is an error.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    AppConfig::from_toml(&content)
        .with_context(|| format!("invalid config file {}", path.display()))
}
