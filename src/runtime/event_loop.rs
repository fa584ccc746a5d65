//! Single-threaded cooperative event loop with a manual clock.
//!
//! The host drives time with [`Runtime::advance_by`] / [`Runtime::advance_to`]; tests
//! use the same calls as a fake clock. Callbacks run with no internal borrow held, so
//! they may schedule, cancel or dispatch freely.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::foundation::core::{Millis, Point, Viewport};
use crate::runtime::handle::{ListenerGuard, Liveness, TaskHandle};
use crate::runtime::signal::{Signal, SignalKind};

/// Frame cadence for `request_frame` / frame loops (~60 fps).
pub const FRAME_INTERVAL: Millis = Millis(16);

type ListenerFn = Rc<RefCell<dyn FnMut(&Signal)>>;

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat {
        period: Millis,
        f: Box<dyn FnMut()>,
    },
    FrameLoop(Box<dyn FnMut(Millis)>),
}

struct Entry {
    live: Liveness,
    task: Task,
}

struct Listener {
    kind: SignalKind,
    live: Liveness,
    f: ListenerFn,
}

struct Inner {
    now: Millis,
    next_seq: u64,
    queue: BTreeMap<(Millis, u64), Entry>,
    listeners: Vec<Listener>,
    viewport: Viewport,
    pointer: Option<Point>,
    frame_interval: Millis,
}

impl Inner {
    fn push(&mut self, due: Millis, entry: Entry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), entry);
    }

    fn next_frame_after(&self, t: Millis) -> Millis {
        let step = self.frame_interval.0.max(1);
        Millis((t.0 / step + 1) * step)
    }
}

/// Cheap to clone; all clones drive the same loop.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Runtime")
            .field("now", &inner.now)
            .field("queued", &inner.queue.len())
            .field("listeners", &inner.listeners.len())
            .field("viewport", &inner.viewport)
            .finish()
    }
}

impl Runtime {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_frame_interval(viewport, FRAME_INTERVAL)
    }

    pub fn with_frame_interval(viewport: Viewport, frame_interval: Millis) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                now: Millis::ZERO,
                next_seq: 0,
                queue: BTreeMap::new(),
                listeners: Vec::new(),
                viewport,
                pointer: None,
                frame_interval: Millis(frame_interval.0.max(1)),
            })),
        }
    }

    pub fn now(&self) -> Millis {
        self.inner.borrow().now
    }

    pub fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    /// Last pointer position dispatched to this loop.
    pub fn pointer(&self) -> Option<Point> {
        self.inner.borrow().pointer
    }

    pub fn frame_interval(&self) -> Millis {
        self.inner.borrow().frame_interval
    }

    /// Run `f` once, `delay` after now.
    pub fn set_timeout(&self, delay: Millis, f: impl FnOnce() + 'static) -> TaskHandle {
        self.schedule(delay, Task::Once(Box::new(f)), "timeout")
    }

    /// Run `f` every `period` (first run one period from now).
    pub fn set_interval(&self, period: Millis, f: impl FnMut() + 'static) -> TaskHandle {
        let period = Millis(period.0.max(1));
        self.schedule(
            period,
            Task::Repeat {
                period,
                f: Box::new(f),
            },
            "interval",
        )
    }

    /// Run `f` on the next frame boundary, then again every frame until cancelled.
    pub fn start_frame_loop(&self, f: impl FnMut(Millis) + 'static) -> TaskHandle {
        let live = Liveness::new();
        let mut inner = self.inner.borrow_mut();
        let due = inner.next_frame_after(inner.now);
        inner.push(
            due,
            Entry {
                live: live.clone(),
                task: Task::FrameLoop(Box::new(f)),
            },
        );
        TaskHandle::new(live, "frame-loop")
    }

    /// Run `f` once on the next frame boundary.
    pub fn request_frame(&self, f: impl FnOnce(Millis) + 'static) -> TaskHandle {
        let live = Liveness::new();
        let mut inner = self.inner.borrow_mut();
        let due = inner.next_frame_after(inner.now);
        inner.push(
            due,
            Entry {
                live: live.clone(),
                task: Task::Once(Box::new(move || f(due))),
            },
        );
        TaskHandle::new(live, "frame")
    }

    fn schedule(&self, delay: Millis, task: Task, label: &'static str) -> TaskHandle {
        let live = Liveness::new();
        let mut inner = self.inner.borrow_mut();
        let due = inner.now.saturating_add(delay);
        inner.push(
            due,
            Entry {
                live: live.clone(),
                task,
            },
        );
        TaskHandle::new(live, label)
    }

    /// Register a global listener for one signal kind.
    pub fn listen(
        &self,
        kind: SignalKind,
        label: &'static str,
        f: impl FnMut(&Signal) + 'static,
    ) -> ListenerGuard {
        let live = Liveness::new();
        let mut inner = self.inner.borrow_mut();
        inner.listeners.retain(|l| l.live.is_live());
        inner.listeners.push(Listener {
            kind,
            live: live.clone(),
            f: Rc::new(RefCell::new(f)),
        });
        ListenerGuard::new(live, label)
    }

    /// Deliver a signal to every live listener of its kind, in registration order.
    pub fn dispatch(&self, signal: Signal) {
        let targets: Vec<(Liveness, ListenerFn)> = {
            let mut inner = self.inner.borrow_mut();
            match signal {
                Signal::Resize(vp) => inner.viewport = vp,
                Signal::PointerMove(p) => inner.pointer = Some(p),
                Signal::Scroll(_) => {}
            }
            inner.listeners.retain(|l| l.live.is_live());
            inner
                .listeners
                .iter()
                .filter(|l| l.kind == signal.kind())
                .map(|l| (l.live.clone(), Rc::clone(&l.f)))
                .collect()
        };

        for (live, f) in targets {
            // An earlier listener may have torn this one down.
            if !live.is_live() {
                continue;
            }
            match f.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(&signal),
                Err(_) => tracing::warn!(?signal, "re-entrant dispatch skipped"),
            }
        }
    }

    pub fn advance_by(&self, dt: Millis) {
        let target = self.now().saturating_add(dt);
        self.advance_to(target);
    }

    /// Run every task due at or before `target`, in due order, then set the clock to `target`.
    pub fn advance_to(&self, target: Millis) {
        loop {
            let (due, entry) = {
                let mut inner = self.inner.borrow_mut();
                match inner.queue.first_key_value() {
                    Some((&(due, _), _)) if due <= target => {}
                    _ => break,
                }
                let Some(((due, _), entry)) = inner.queue.pop_first() else {
                    break;
                };
                if due > inner.now {
                    inner.now = due;
                }
                (due, entry)
            };

            if !entry.live.is_live() {
                continue;
            }

            match entry.task {
                Task::Once(f) => {
                    entry.live.kill();
                    f();
                }
                Task::Repeat { period, mut f } => {
                    f();
                    if entry.live.is_live() {
                        self.inner.borrow_mut().push(
                            due.saturating_add(period),
                            Entry {
                                live: entry.live,
                                task: Task::Repeat { period, f },
                            },
                        );
                    }
                }
                Task::FrameLoop(mut f) => {
                    f(due);
                    if entry.live.is_live() {
                        let mut inner = self.inner.borrow_mut();
                        let next = inner.next_frame_after(due);
                        inner.push(
                            next,
                            Entry {
                                live: entry.live,
                                task: Task::FrameLoop(f),
                            },
                        );
                    }
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
    }

    /// Live queued tasks (timeouts, intervals, frame callbacks).
    pub fn pending_tasks(&self) -> usize {
        self.inner
            .borrow()
            .queue
            .values()
            .filter(|e| e.live.is_live())
            .count()
    }

    /// Live registered listeners across all signal kinds.
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.live.is_live())
            .count()
    }

    /// Due time of the earliest live task.
    pub fn next_due(&self) -> Option<Millis> {
        self.inner
            .borrow()
            .queue
            .iter()
            .find(|(_, e)| e.live.is_live())
            .map(|(&(due, _), _)| due)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/event_loop.rs"]
mod tests;
