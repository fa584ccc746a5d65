use crate::runtime::handle::{ListenerGuard, TaskHandle};

/// Everything a mounted view acquired from the runtime.
///
/// Releasing (or dropping) the scope cancels every task and removes every listener,
/// whichever way the view goes away.
#[derive(Debug)]
pub struct MountScope {
    label: String,
    tasks: Vec<TaskHandle>,
    listeners: Vec<ListenerGuard>,
    released: bool,
}

impl MountScope {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tasks: Vec::new(),
            listeners: Vec::new(),
            released: false,
        }
    }

    pub fn hold_task(&mut self, handle: TaskHandle) {
        self.tasks.push(handle);
    }

    pub fn hold_listener(&mut self, guard: ListenerGuard) {
        self.listeners.push(guard);
    }

    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_active()).count()
    }

    pub fn listeners(&self) -> usize {
        self.listeners.iter().filter(|l| l.is_registered()).count()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        let tasks = self.tasks.len();
        let listeners = self.listeners.len();
        for t in self.tasks.drain(..) {
            t.cancel();
        }
        for l in self.listeners.drain(..) {
            l.remove();
        }
        self.released = true;
        tracing::debug!(scope = %self.label, tasks, listeners, "mount scope released");
    }
}

impl Drop for MountScope {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scope.rs"]
mod tests;
