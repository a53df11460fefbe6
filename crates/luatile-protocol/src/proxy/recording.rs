//! Recording proxies: every request is appended to a shared log.

use std::cell::RefCell;
use std::rc::Rc;

use luatile_common::{OutputId, View};

use super::{LayoutBindingProxy, LayoutManagerProxy, OutputProxy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    GetLayout { output: OutputId, namespace: String },
    PushView { output: OutputId, view: View, serial: u32 },
    Commit { output: OutputId, layout_name: String, serial: u32 },
    DestroyBinding(OutputId),
    ReleaseOutput(OutputId),
    DestroyManager,
}

pub(crate) type RequestLog = Rc<RefCell<Vec<Request>>>;

pub(crate) struct RecordingOutput {
    id: OutputId,
    log: RequestLog,
}

impl RecordingOutput {
    pub(crate) fn new(id: u32, log: &RequestLog) -> Self {
        Self {
            id: OutputId(id),
            log: Rc::clone(log),
        }
    }
}

impl OutputProxy for RecordingOutput {
    fn release_output(&self) {
        self.log.borrow_mut().push(Request::ReleaseOutput(self.id));
    }
}

pub(crate) struct RecordingBinding {
    output: OutputId,
    log: RequestLog,
}

impl LayoutBindingProxy for RecordingBinding {
    fn push_view(&self, view: &View, serial: u32) {
        self.log.borrow_mut().push(Request::PushView {
            output: self.output,
            view: *view,
            serial,
        });
    }

    fn commit_layout(&self, layout_name: &str, serial: u32) {
        self.log.borrow_mut().push(Request::Commit {
            output: self.output,
            layout_name: layout_name.to_string(),
            serial,
        });
    }

    fn destroy_binding(&self) {
        self.log
            .borrow_mut()
            .push(Request::DestroyBinding(self.output));
    }
}

pub(crate) struct RecordingManager {
    log: RequestLog,
}

impl RecordingManager {
    pub(crate) fn new(log: &RequestLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl LayoutManagerProxy for RecordingManager {
    type Output = RecordingOutput;
    type Binding = RecordingBinding;

    fn create_binding(
        &self,
        _output: &RecordingOutput,
        id: OutputId,
        namespace: &str,
    ) -> RecordingBinding {
        self.log.borrow_mut().push(Request::GetLayout {
            output: id,
            namespace: namespace.to_string(),
        });
        RecordingBinding {
            output: id,
            log: Rc::clone(&self.log),
        }
    }

    fn destroy_manager(&self) {
        self.log.borrow_mut().push(Request::DestroyManager);
    }
}

pub(crate) fn new_log() -> RequestLog {
    Rc::new(RefCell::new(Vec::new()))
}
