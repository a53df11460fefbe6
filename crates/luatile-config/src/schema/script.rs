//! Layout script settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Layout script configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Script loaded when none is given on the command line.
    pub path: Option<PathBuf>,
    /// Name of the function the script must define to produce layouts.
    pub layout_function: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            path: None,
            layout_function: "layout".into(),
        }
    }
}
