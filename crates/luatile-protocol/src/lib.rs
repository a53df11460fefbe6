//! River layout protocol client: output bookkeeping, the event dispatcher
//! and its Wayland transport.

pub mod dispatcher;
pub mod proxy;
pub mod registry;
pub mod wayland;

pub use dispatcher::{
    DispatchEvent, DispatcherSettings, EventDispatcher, EventPump, LayoutDemand, Phase,
    PumpStatus, LAYOUT_MANAGER_INTERFACE, RELOAD_COMMAND,
};
pub use registry::{Output, OutputRegistry};
pub use wayland::{connect, run, WaylandDispatcher, WaylandPump};
