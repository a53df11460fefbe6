//! luatile configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! sensible defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LuatileConfig, CONFIG_SCHEMA_VERSION};

use luatile_common::ConfigError;
use std::path::Path;

/// Load config from `path` if given, otherwise from the platform default path.
///
/// An explicit path must exist. The default path is created with a
/// commented template when missing.
pub fn load_config(path: Option<&Path>) -> Result<LuatileConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
