//! The event dispatcher: reacts to compositor events, configures outputs
//! and answers layout demands with views from a [`LayoutGenerator`].

mod types;


pub use types::{DispatchEvent, DispatcherSettings, EventPump, LayoutDemand, Phase, PumpStatus};

use luatile_common::{LateOutputPolicy, LayoutGenerator, OutputId, ProtocolError};
use tracing::{debug, error, info, warn};

use crate::proxy::{LayoutBindingProxy, LayoutManagerProxy, OutputProxy};
use crate::registry::OutputRegistry;

/// Interface name of the layout-manager global.
pub const LAYOUT_MANAGER_INTERFACE: &str = "river_layout_manager_v3";

/// User command that reloads the script instead of being evaluated.
pub const RELOAD_COMMAND: &str = "reload";

pub struct EventDispatcher<M: LayoutManagerProxy, G: LayoutGenerator> {
    settings: DispatcherSettings,
    generator: G,
    manager: Option<(u32, M)>,
    outputs: OutputRegistry<M>,
    phase: Phase,
    failure: Option<ProtocolError>,
}

impl<M: LayoutManagerProxy, G: LayoutGenerator> EventDispatcher<M, G> {
    pub fn new(settings: DispatcherSettings, generator: G) -> Self {
        Self {
            settings,
            generator,
            manager: None,
            outputs: OutputRegistry::new(),
            phase: Phase::Discovering,
            failure: None,
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    pub fn handle(&mut self, event: DispatchEvent<M>) {
        match event {
            DispatchEvent::ManagerAdvertised { name, manager } => {
                self.on_manager_advertised(name, manager)
            }
            DispatchEvent::OutputAdvertised { id, output } => self.on_output_advertised(id, output),
            DispatchEvent::GlobalRemoved { name } => self.on_global_removed(name),
            DispatchEvent::SyncDone => self.on_sync_done(),
            DispatchEvent::NamespaceInUse { output } => self.on_namespace_in_use(output),
            DispatchEvent::LayoutDemand(demand) => self.on_layout_demand(demand),
            DispatchEvent::UserCommand { output, command } => {
                self.on_user_command(output, &command)
            }
        }
    }

    fn on_manager_advertised(&mut self, name: u32, manager: M) {
        if self.manager.is_some() || self.phase == Phase::Stopped {
            debug!(name, "extra layout manager global, destroying it");
            manager.destroy_manager();
            return;
        }
        debug!(name, "layout manager bound");
        self.manager = Some((name, manager));
    }

    fn on_output_advertised(&mut self, id: OutputId, output: M::Output) {
        if self.phase == Phase::Stopped {
            output.release_output();
            return;
        }

        self.outputs.add_output(id, output);
        debug!(output = %id, "output discovered");

        if self.phase != Phase::Running {
            return;
        }
        match self.settings.late_outputs {
            LateOutputPolicy::Configure => {
                if let Some((_, manager)) = &self.manager {
                    self.outputs.configure(id, manager, &self.settings.namespace);
                    info!(output = %id, "late output configured");
                }
            }
            LateOutputPolicy::Ignore => {
                info!(output = %id, "late output left without a layout");
            }
        }
    }

    fn on_global_removed(&mut self, name: u32) {
        if self.outputs.remove_output(OutputId(name)) {
            info!(output = %OutputId(name), "output removed");
            return;
        }
        if self.manager.as_ref().is_some_and(|(n, _)| *n == name) {
            if let Some((_, manager)) = self.manager.take() {
                manager.destroy_manager();
            }
            self.fail(ProtocolError::ManagerRemoved);
        }
    }

    fn on_sync_done(&mut self) {
        if self.phase != Phase::Discovering {
            debug!(phase = ?self.phase, "sync completion outside discovery ignored");
            return;
        }

        let Some((_, manager)) = &self.manager else {
            self.fail(ProtocolError::Unsupported(
                LAYOUT_MANAGER_INTERFACE.to_string(),
            ));
            return;
        };

        let configured = self
            .outputs
            .configure_all(manager, &self.settings.namespace);
        self.phase = Phase::Running;
        info!(
            outputs = configured,
            namespace = %self.settings.namespace,
            "layout client running"
        );
    }

    fn on_namespace_in_use(&mut self, output: OutputId) {
        if self.phase != Phase::Running {
            debug!(output = %output, "namespace_in_use outside running phase ignored");
            return;
        }
        self.fail(ProtocolError::NamespaceInUse(
            self.settings.namespace.clone(),
        ));
    }

    fn on_layout_demand(&mut self, demand: LayoutDemand) {
        if self.phase != Phase::Running {
            debug!(output = %demand.output, "layout demand outside running phase ignored");
            return;
        }
        let Some(binding) = self.outputs.binding(demand.output) else {
            debug!(output = %demand.output, "layout demand for an unconfigured output ignored");
            return;
        };

        debug!(
            output = %demand.output,
            view_count = demand.view_count,
            width = demand.width,
            height = demand.height,
            tags = demand.tags,
            serial = demand.serial,
            "layout demand"
        );

        let views = match self
            .generator
            .generate(demand.view_count, demand.width, demand.height)
        {
            Ok(views) => views,
            Err(e) => {
                warn!(output = %demand.output, serial = demand.serial, "layout not committed: {e}");
                return;
            }
        };

        // A commit with the wrong number of views is a protocol error.
        if views.len() != demand.view_count as usize {
            error!(
                output = %demand.output,
                expected = demand.view_count,
                actual = views.len(),
                "generator returned the wrong number of views; layout not committed"
            );
            return;
        }

        for view in &views {
            binding.push_view(view, demand.serial);
        }
        binding.commit_layout(&self.settings.layout_name, demand.serial);
    }

    fn on_user_command(&mut self, output: OutputId, command: &str) {
        if self.phase != Phase::Running {
            debug!(output = %output, "user command outside running phase ignored");
            return;
        }

        if command.trim() == RELOAD_COMMAND {
            match self.generator.reload() {
                Ok(()) => info!("layout script reloaded"),
                Err(e) => error!("reload failed, keeping the previous script: {e}"),
            }
            return;
        }

        match self.generator.command(command) {
            Ok(()) => debug!(output = %output, command, "user command evaluated"),
            Err(e) => warn!(output = %output, command, "user command failed: {e}"),
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Record a fatal error. Only the first one is kept.
    pub fn fail(&mut self, error: ProtocolError) {
        error!("{error}");
        if self.failure.is_none() {
            self.failure = Some(error);
        }
        if self.phase != Phase::Stopped {
            self.phase = Phase::Terminating;
        }
    }

    /// Pump events until the transport closes or a fatal error is
    /// recorded, then tear everything down.
    pub fn run<P: EventPump<Self>>(&mut self, pump: &mut P) -> Result<(), ProtocolError> {
        while !self.is_failed() && self.phase != Phase::Stopped {
            match pump.pump(self) {
                Ok(PumpStatus::Continue) => {}
                Ok(PumpStatus::Closed) => {
                    info!("compositor connection closed");
                    break;
                }
                Err(e) => self.fail(e),
            }
        }

        self.teardown();
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Destroy every binding, release every output and destroy the
    /// manager. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.phase == Phase::Stopped {
            return;
        }
        self.outputs.destroy_all();
        if let Some((_, manager)) = self.manager.take() {
            manager.destroy_manager();
        }
        self.phase = Phase::Stopped;
        debug!("protocol objects released");
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<&ProtocolError> {
        self.failure.as_ref()
    }

    pub fn has_manager(&self) -> bool {
        self.manager.is_some()
    }

    pub fn outputs(&self) -> &OutputRegistry<M> {
        &self.outputs
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
