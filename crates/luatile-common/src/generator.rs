//! The seam between protocol handling and whatever produces geometry.

use crate::errors::{LayoutError, ScriptEvalError, ScriptLoadError};
use crate::types::View;

/// Something that can answer layout demands and user commands.
///
/// Implementations run on the dispatch thread and are never called
/// re-entrantly.
pub trait LayoutGenerator {
    /// Produce exactly `view_count` views for a `width` x `height` area.
    fn generate(&mut self, view_count: u32, width: u32, height: u32)
        -> Result<Vec<View>, LayoutError>;

    /// Apply a free-form command relayed by the compositor.
    fn command(&mut self, command: &str) -> Result<(), ScriptEvalError>;

    /// Re-read the layout source from disk.
    fn reload(&mut self) -> Result<(), ScriptLoadError>;
}

impl<T: LayoutGenerator + ?Sized> LayoutGenerator for Box<T> {
    fn generate(
        &mut self,
        view_count: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<View>, LayoutError> {
        (**self).generate(view_count, width, height)
    }

    fn command(&mut self, command: &str) -> Result<(), ScriptEvalError> {
        (**self).command(command)
    }

    fn reload(&mut self) -> Result<(), ScriptLoadError> {
        (**self).reload()
    }
}
