use std::cell::Cell;
use std::rc::Rc;

/// Shared on/off flag between a scheduled item and the handle that owns it.
#[derive(Clone, Debug)]
pub(crate) struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub(crate) fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub(crate) fn is_live(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn kill(&self) {
        self.0.set(false);
    }
}

/// Owner of a scheduled timeout, interval or frame loop.
///
/// Dropping the handle cancels the task; no callback runs after that.
#[must_use = "dropping a TaskHandle cancels the task"]
#[derive(Debug)]
pub struct TaskHandle {
    live: Liveness,
    label: &'static str,
}

impl TaskHandle {
    pub(crate) fn new(live: Liveness, label: &'static str) -> Self {
        Self { live, label }
    }

    pub fn cancel(&self) {
        self.live.kill();
    }

    /// `false` once cancelled or, for one-shot tasks, once fired.
    pub fn is_active(&self) -> bool {
        self.live.is_live()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.live.kill();
    }
}

/// Registration of a global signal listener. Dropping it deregisters the listener.
#[must_use = "dropping a ListenerGuard removes the listener"]
#[derive(Debug)]
pub struct ListenerGuard {
    live: Liveness,
    label: &'static str,
}

impl ListenerGuard {
    pub(crate) fn new(live: Liveness, label: &'static str) -> Self {
        Self { live, label }
    }

    pub fn remove(&self) {
        self.live.kill();
    }

    pub fn is_registered(&self) -> bool {
        self.live.is_live()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.live.kill();
    }
}
