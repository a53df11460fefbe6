//! Configuration schema types for luatile.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod protocol;
mod script;
mod system;

pub use protocol::*;
pub use script::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for luatile.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LuatileConfig {
    pub protocol: ProtocolConfig,
    pub script: ScriptConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
