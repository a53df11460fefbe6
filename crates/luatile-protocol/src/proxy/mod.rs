//! Transport-agnostic handles for the compositor objects the dispatcher
//! talks to.
//!
//! The Wayland implementations live in [`crate::wayland`]; tests use
//! [`recording`] fakes that log every request.

#[cfg(test)]
pub(crate) mod recording;

use luatile_common::{OutputId, View};

/// A bound output (`wl_output`).
pub trait OutputProxy {
    /// Tell the compositor this client no longer uses the output.
    fn release_output(&self);
}

/// A per-output layout object (`river_layout_v3`).
pub trait LayoutBindingProxy {
    fn push_view(&self, view: &View, serial: u32);
    fn commit_layout(&self, layout_name: &str, serial: u32);
    fn destroy_binding(&self);
}

/// The layout-manager global (`river_layout_manager_v3`).
pub trait LayoutManagerProxy {
    type Output: OutputProxy;
    type Binding: LayoutBindingProxy;

    /// Create the layout object for `output` under `namespace`. Events of
    /// the returned binding are tagged with `id`.
    fn create_binding(&self, output: &Self::Output, id: OutputId, namespace: &str)
        -> Self::Binding;

    fn destroy_manager(&self);
}
