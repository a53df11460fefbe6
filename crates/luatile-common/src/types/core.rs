use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometry of one window, as pushed to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct View {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl View {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Compositor-assigned identity of an output (its registry global name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputId(pub u32);

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output-{}", self.0)
    }
}

/// What to do with outputs advertised after the initial sync barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LateOutputPolicy {
    /// Bind a layout object as soon as the output appears.
    #[default]
    Configure,
    /// Track the output but never lay it out.
    Ignore,
}
