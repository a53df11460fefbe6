//! Dispatcher phases, events and settings.

use luatile_common::{LateOutputPolicy, OutputId, ProtocolError};

use crate::proxy::LayoutManagerProxy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for globals and the initial sync barrier.
    Discovering,
    /// Outputs configured; answering layout demands.
    Running,
    /// A fatal error occurred; the loop exits before the next dispatch.
    Terminating,
    /// Teardown done.
    Stopped,
}

/// A layout demand for one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDemand {
    pub output: OutputId,
    pub view_count: u32,
    pub width: u32,
    pub height: u32,
    pub tags: u32,
    pub serial: u32,
}

/// Every compositor event the dispatcher reacts to.
pub enum DispatchEvent<M: LayoutManagerProxy> {
    /// The layout-manager global was advertised and bound.
    ManagerAdvertised { name: u32, manager: M },
    /// An output global was advertised and bound.
    OutputAdvertised { id: OutputId, output: M::Output },
    GlobalRemoved { name: u32 },
    /// The initial sync barrier completed.
    SyncDone,
    NamespaceInUse { output: OutputId },
    LayoutDemand(LayoutDemand),
    UserCommand { output: OutputId, command: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherSettings {
    pub namespace: String,
    pub layout_name: String,
    pub late_outputs: LateOutputPolicy,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            namespace: "luatile".into(),
            layout_name: "[]=".into(),
            late_outputs: LateOutputPolicy::Configure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    Continue,
    /// The transport has no more events to deliver.
    Closed,
}

/// One blocking step of the transport: wait for events and feed them to
/// the dispatcher.
pub trait EventPump<D> {
    fn pump(&mut self, dispatcher: &mut D) -> Result<PumpStatus, ProtocolError>;
}
