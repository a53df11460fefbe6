//! The Wayland side: connection setup, global discovery and translation
//! of protocol events into [`DispatchEvent`]s.

mod proxies;
pub mod river;

use luatile_common::{LayoutGenerator, OutputId, ProtocolError};
use tracing::{debug, info, warn};
use wayland_backend::client::WaylandError;
use wayland_client::protocol::wl_callback::{self, WlCallback};
use wayland_client::protocol::wl_output::WlOutput;
use wayland_client::protocol::wl_registry::{self, WlRegistry};
use wayland_client::{Connection, Dispatch, DispatchError, EventQueue, Proxy, QueueHandle};

use crate::dispatcher::{
    DispatchEvent, DispatcherSettings, EventDispatcher, EventPump, LayoutDemand, PumpStatus,
};
pub use proxies::RiverLayoutManager;
use river::river_layout_manager_v3::{self, RiverLayoutManagerV3};
use river::river_layout_v3::{self, RiverLayoutV3};

/// Highest `river_layout_manager_v3` version this client speaks.
const LAYOUT_MANAGER_VERSION: u32 = 1;
/// Highest `wl_output` version this client binds.
const OUTPUT_VERSION: u32 = 4;

pub type WaylandDispatcher = EventDispatcher<RiverLayoutManager, Box<dyn LayoutGenerator>>;

/// Blocking event source over the compositor connection.
pub struct WaylandPump {
    connection: Connection,
    queue: EventQueue<WaylandDispatcher>,
}

impl WaylandPump {
    /// Send any queued requests, such as teardown destructors.
    pub fn flush(&self) {
        if let Err(e) = self.connection.flush() {
            warn!("failed to flush the compositor connection: {e}");
        }
    }
}

impl EventPump<WaylandDispatcher> for WaylandPump {
    fn pump(&mut self, dispatcher: &mut WaylandDispatcher) -> Result<PumpStatus, ProtocolError> {
        match self.queue.blocking_dispatch(dispatcher) {
            Ok(_) => Ok(PumpStatus::Continue),
            Err(DispatchError::Backend(WaylandError::Io(e))) => {
                debug!("connection ended: {e}");
                Ok(PumpStatus::Closed)
            }
            Err(e) => Err(ProtocolError::Dispatch(e.to_string())),
        }
    }
}

/// Connect to the compositor named by `WAYLAND_DISPLAY`, request the
/// registry and queue the sync barrier that ends discovery.
pub fn connect(
    settings: DispatcherSettings,
    generator: Box<dyn LayoutGenerator>,
) -> Result<(WaylandPump, WaylandDispatcher), ProtocolError> {
    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        return Err(ProtocolError::Connect("WAYLAND_DISPLAY is not set".into()));
    }
    let connection =
        Connection::connect_to_env().map_err(|e| ProtocolError::Connect(e.to_string()))?;
    let queue = connection.new_event_queue();
    let qh = queue.handle();

    let display = connection.display();
    display.get_registry(&qh, ());
    display.sync(&qh, ());
    info!(namespace = %settings.namespace, "connected to compositor");

    let dispatcher = EventDispatcher::new(settings, generator);
    Ok((WaylandPump { connection, queue }, dispatcher))
}

/// Connect, serve layout demands until the connection closes or a fatal
/// error occurs, then release every protocol object.
pub fn run(
    settings: DispatcherSettings,
    generator: Box<dyn LayoutGenerator>,
) -> Result<(), ProtocolError> {
    let (mut pump, mut dispatcher) = connect(settings, generator)?;
    let result = dispatcher.run(&mut pump);
    pump.flush();
    result
}

// =============================================================================
// DISPATCH
// =============================================================================

impl Dispatch<WlRegistry, ()> for WaylandDispatcher {
    fn event(
        state: &mut Self,
        registry: &WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => {
                if interface == RiverLayoutManagerV3::interface().name {
                    let proxy = registry.bind::<RiverLayoutManagerV3, _, _>(
                        name,
                        LAYOUT_MANAGER_VERSION.min(version),
                        qh,
                        (),
                    );
                    state.handle(DispatchEvent::ManagerAdvertised {
                        name,
                        manager: RiverLayoutManager::new(proxy, qh.clone()),
                    });
                } else if interface == WlOutput::interface().name {
                    let id = OutputId(name);
                    let output =
                        registry.bind::<WlOutput, _, _>(name, OUTPUT_VERSION.min(version), qh, id);
                    state.handle(DispatchEvent::OutputAdvertised { id, output });
                }
            }
            wl_registry::Event::GlobalRemove { name } => {
                state.handle(DispatchEvent::GlobalRemoved { name });
            }
            _ => {}
        }
    }
}

impl Dispatch<WlCallback, ()> for WaylandDispatcher {
    fn event(
        state: &mut Self,
        _: &WlCallback,
        event: wl_callback::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_callback::Event::Done { .. } = event {
            state.handle(DispatchEvent::SyncDone);
        }
    }
}

/// Output geometry and naming events carry nothing the layout needs.
impl Dispatch<WlOutput, OutputId> for WaylandDispatcher {
    fn event(
        _: &mut Self,
        _: &WlOutput,
        _: <WlOutput as Proxy>::Event,
        _: &OutputId,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<RiverLayoutManagerV3, ()> for WaylandDispatcher {
    fn event(
        _: &mut Self,
        _: &RiverLayoutManagerV3,
        _: river_layout_manager_v3::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<RiverLayoutV3, OutputId> for WaylandDispatcher {
    fn event(
        state: &mut Self,
        _: &RiverLayoutV3,
        event: river_layout_v3::Event,
        output: &OutputId,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        let output = *output;
        match event {
            river_layout_v3::Event::NamespaceInUse => {
                state.handle(DispatchEvent::NamespaceInUse { output });
            }
            river_layout_v3::Event::LayoutDemand {
                view_count,
                usable_width,
                usable_height,
                tags,
                serial,
            } => state.handle(DispatchEvent::LayoutDemand(LayoutDemand {
                output,
                view_count,
                width: usable_width,
                height: usable_height,
                tags,
                serial,
            })),
            river_layout_v3::Event::UserCommand { command } => {
                state.handle(DispatchEvent::UserCommand { output, command });
            }
            _ => {}
        }
    }
}
