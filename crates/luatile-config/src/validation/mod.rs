//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod protocol;
mod script;


use crate::schema::LuatileConfig;
use luatile_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &LuatileConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    protocol::validate_protocol(&mut errors, config);
    script::validate_script(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
