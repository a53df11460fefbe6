//! Proxy traits implemented over live Wayland objects.

use luatile_common::{OutputId, View};
use wayland_client::protocol::wl_output::WlOutput;
use wayland_client::{Proxy, QueueHandle};

use super::river::river_layout_manager_v3::RiverLayoutManagerV3;
use super::river::river_layout_v3::RiverLayoutV3;
use super::WaylandDispatcher;
use crate::proxy::{LayoutBindingProxy, LayoutManagerProxy, OutputProxy};

/// `wl_output.release` exists since version 3.
const OUTPUT_RELEASE_SINCE: u32 = 3;

impl OutputProxy for WlOutput {
    fn release_output(&self) {
        if self.version() >= OUTPUT_RELEASE_SINCE {
            self.release();
        }
    }
}

impl LayoutBindingProxy for RiverLayoutV3 {
    fn push_view(&self, view: &View, serial: u32) {
        self.push_view_dimensions(
            view.x,
            view.y,
            view.width.max(0) as u32,
            view.height.max(0) as u32,
            serial,
        );
    }

    fn commit_layout(&self, layout_name: &str, serial: u32) {
        self.commit(layout_name.to_string(), serial);
    }

    fn destroy_binding(&self) {
        self.destroy();
    }
}

/// The bound layout manager plus the queue its layout objects dispatch on.
pub struct RiverLayoutManager {
    proxy: RiverLayoutManagerV3,
    qh: QueueHandle<WaylandDispatcher>,
}

impl RiverLayoutManager {
    pub(super) fn new(proxy: RiverLayoutManagerV3, qh: QueueHandle<WaylandDispatcher>) -> Self {
        Self { proxy, qh }
    }
}

impl LayoutManagerProxy for RiverLayoutManager {
    type Output = WlOutput;
    type Binding = RiverLayoutV3;

    fn create_binding(&self, output: &WlOutput, id: OutputId, namespace: &str) -> RiverLayoutV3 {
        self.proxy.get_layout(output, namespace.to_string(), &self.qh, id)
    }

    fn destroy_manager(&self) {
        self.proxy.destroy();
    }
}
