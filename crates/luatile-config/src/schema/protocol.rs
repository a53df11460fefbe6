//! Compositor-facing settings.

use luatile_common::LateOutputPolicy;
use serde::{Deserialize, Serialize};

/// Settings for the river-layout-v3 client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Namespace the compositor uses to select this layout generator.
    pub namespace: String,
    /// User-facing layout name sent with every commit.
    pub layout_name: String,
    /// Policy for outputs that appear after startup discovery.
    pub late_outputs: LateOutputPolicy,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            namespace: "luatile".into(),
            layout_name: "[]=".into(),
            late_outputs: LateOutputPolicy::Configure,
        }
    }
}
