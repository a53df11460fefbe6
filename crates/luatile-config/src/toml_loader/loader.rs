//! Core TOML config loading: read from path or platform default.

use crate::schema::LuatileConfig;
use crate::validation;
use luatile_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields and
/// validates the result.
pub fn load_from_path(path: &Path) -> Result<LuatileConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: LuatileConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path
/// (`~/.config/luatile/config.toml` on Linux).
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<LuatileConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(LuatileConfig::default())
        }
        Err(e) => Err(e),
    }
}
