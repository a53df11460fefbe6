//! Outputs known to the client and their layout bindings.

use luatile_common::OutputId;
use tracing::{debug, warn};

use crate::proxy::{LayoutBindingProxy, LayoutManagerProxy, OutputProxy};

/// One compositor output. It has a binding iff it has been configured.
pub struct Output<M: LayoutManagerProxy> {
    id: OutputId,
    handle: M::Output,
    binding: Option<M::Binding>,
}

impl<M: LayoutManagerProxy> Output<M> {
    pub fn id(&self) -> OutputId {
        self.id
    }

    pub fn is_configured(&self) -> bool {
        self.binding.is_some()
    }

    fn configure(&mut self, manager: &M, namespace: &str) {
        if self.binding.is_none() {
            self.binding = Some(manager.create_binding(&self.handle, self.id, namespace));
            debug!(output = %self.id, namespace, "layout binding created");
        }
    }

    fn destroy(self) {
        if let Some(binding) = self.binding {
            binding.destroy_binding();
        }
        self.handle.release_output();
    }
}

pub struct OutputRegistry<M: LayoutManagerProxy> {
    outputs: Vec<Output<M>>,
}

impl<M: LayoutManagerProxy> OutputRegistry<M> {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    /// Track a newly advertised output, unconfigured. An output already
    /// tracked under the same id is destroyed and replaced.
    pub fn add_output(&mut self, id: OutputId, handle: M::Output) {
        if self.remove_output(id) {
            warn!(output = %id, "output advertised twice, replacing");
        }
        self.outputs.push(Output {
            id,
            handle,
            binding: None,
        });
    }

    /// Create a layout binding for every unconfigured output. Returns how
    /// many were configured.
    pub fn configure_all(&mut self, manager: &M, namespace: &str) -> usize {
        let mut configured = 0;
        for output in self.outputs.iter_mut().filter(|o| !o.is_configured()) {
            output.configure(manager, namespace);
            configured += 1;
        }
        configured
    }

    /// Create the layout binding for one output. Returns `false` if the
    /// output is unknown or already configured.
    pub fn configure(&mut self, id: OutputId, manager: &M, namespace: &str) -> bool {
        match self.outputs.iter_mut().find(|o| o.id == id) {
            Some(output) if !output.is_configured() => {
                output.configure(manager, namespace);
                true
            }
            _ => false,
        }
    }

    /// Destroy the output's binding (if any), release it and forget it.
    pub fn remove_output(&mut self, id: OutputId) -> bool {
        match self.outputs.iter().position(|o| o.id == id) {
            Some(index) => {
                self.outputs.swap_remove(index).destroy();
                true
            }
            None => false,
        }
    }

    pub fn destroy_all(&mut self) {
        for output in self.outputs.drain(..) {
            output.destroy();
        }
    }

    pub fn binding(&self, id: OutputId) -> Option<&M::Binding> {
        self.get(id).and_then(|o| o.binding.as_ref())
    }

    pub fn get(&self, id: OutputId) -> Option<&Output<M>> {
        self.outputs.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: OutputId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_configured(&self, id: OutputId) -> bool {
        self.get(id).is_some_and(Output::is_configured)
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn configured_count(&self) -> usize {
        self.outputs.iter().filter(|o| o.is_configured()).count()
    }
}

impl<M: LayoutManagerProxy> Default for OutputRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}
