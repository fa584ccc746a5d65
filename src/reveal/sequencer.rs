//! Drives a [`RevealState`] from a single runtime timer.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::foundation::{
    core::Millis,
    error::{MotionError, MotionResult},
};
use crate::reveal::state::{BootScript, RevealEvent, RevealState};
use crate::runtime::{event_loop::Runtime, handle::TaskHandle};

/// Boot sequence cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BootTiming {
    /// One character per tick.
    pub tick_ms: u64,
    /// Hold after each fully revealed line.
    pub pause_ms: u64,
    /// Delay between sequence completion and the booted UI change.
    pub settle_ms: u64,
}

impl Default for BootTiming {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            pause_ms: 500,
            settle_ms: 500,
        }
    }
}

impl BootTiming {
    pub fn validate(&self) -> MotionResult<()> {
        if self.tick_ms == 0 {
            return Err(MotionError::configuration("boot tick interval must be > 0"));
        }
        Ok(())
    }

    /// Time from mount to `SequenceComplete`.
    pub fn completion_time(&self, script: &BootScript) -> Millis {
        Millis(
            self.tick_ms * script.total_chars() as u64 + self.pause_ms * script.len() as u64,
        )
    }
}

type BootedCallback = Box<dyn FnOnce()>;

struct Inner {
    script: BootScript,
    timing: BootTiming,
    state: RevealState,
    booted: bool,
    ticks: usize,
    history: Vec<(Millis, RevealState)>,
    on_booted: Option<BootedCallback>,
    // The one pending timer of this sequence.
    timer: Option<TaskHandle>,
}

impl Inner {
    fn apply(&mut self, event: RevealEvent, now: Millis) {
        let next = self.state.step(event, &self.script);
        if next != self.state {
            self.state = next;
            self.history.push((now, next));
        }
    }
}

/// A mounted boot sequence. Dropping it cancels the pending timer; no transition is
/// observable afterwards.
pub struct BootSequencer {
    shared: Rc<RefCell<Inner>>,
}

impl std::fmt::Debug for BootSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.borrow();
        f.debug_struct("BootSequencer")
            .field("state", &inner.state)
            .field("booted", &inner.booted)
            .field("ticks", &inner.ticks)
            .finish()
    }
}

impl BootSequencer {
    #[tracing::instrument(skip(runtime, script), fields(lines = script.len()))]
    pub fn mount(runtime: &Runtime, script: BootScript, timing: BootTiming) -> MotionResult<Self> {
        timing.validate()?;
        let now = runtime.now();
        let shared = Rc::new(RefCell::new(Inner {
            script,
            timing,
            state: RevealState::Idle,
            booted: false,
            ticks: 0,
            history: Vec::new(),
            on_booted: None,
            timer: None,
        }));
        {
            let mut inner = shared.borrow_mut();
            inner.apply(RevealEvent::Start, now);
            if inner.state.is_line_full(&inner.script) {
                inner.apply(RevealEvent::LineFilled, now);
            }
        }
        arm(&Rc::downgrade(&shared), runtime);
        Ok(Self { shared })
    }

    /// Register the one-time booted hook (replaces any earlier hook).
    pub fn on_booted(&self, f: impl FnOnce() + 'static) {
        let mut inner = self.shared.borrow_mut();
        if inner.booted {
            drop(inner);
            f();
        } else {
            inner.on_booted = Some(Box::new(f));
        }
    }

    pub fn state(&self) -> RevealState {
        self.shared.borrow().state
    }

    pub fn is_booted(&self) -> bool {
        self.shared.borrow().booted
    }

    /// Reveal ticks applied so far.
    pub fn ticks(&self) -> usize {
        self.shared.borrow().ticks
    }

    pub fn revealed_text(&self) -> String {
        let inner = self.shared.borrow();
        inner.state.revealed_text(&inner.script).to_string()
    }

    pub fn transcript(&self) -> Vec<String> {
        let inner = self.shared.borrow();
        inner
            .state
            .transcript(&inner.script)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Every state change with the runtime time it happened at.
    pub fn history(&self) -> Vec<(Millis, RevealState)> {
        self.shared.borrow().history.clone()
    }

    pub fn timing(&self) -> BootTiming {
        self.shared.borrow().timing
    }

    pub fn script(&self) -> BootScript {
        self.shared.borrow().script.clone()
    }

    /// `true` while a transition is still scheduled.
    pub fn is_pending(&self) -> bool {
        self.shared
            .borrow()
            .timer
            .as_ref()
            .is_some_and(TaskHandle::is_active)
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for BootSequencer {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.shared.try_borrow_mut()
            && let Some(timer) = inner.timer.take()
        {
            timer.cancel();
        }
    }
}

/// What the next timer should deliver.
#[derive(Clone, Copy, Debug)]
enum Wake {
    Event(RevealEvent),
    Booted,
}

fn arm(weak: &Weak<RefCell<Inner>>, runtime: &Runtime) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let mut inner = shared.borrow_mut();
    let timing = inner.timing;
    let (delay, wake) = match inner.state {
        RevealState::RevealingLine(..) => (timing.tick_ms, Wake::Event(RevealEvent::Tick)),
        RevealState::LineComplete(_) => (timing.pause_ms, Wake::Event(RevealEvent::PauseElapsed)),
        RevealState::SequenceComplete if !inner.booted => (timing.settle_ms, Wake::Booted),
        RevealState::SequenceComplete | RevealState::Idle => {
            inner.timer = None;
            return;
        }
    };

    let weak_cb = weak.clone();
    let rt = runtime.clone();
    inner.timer = Some(runtime.set_timeout(Millis(delay), move || fire(&weak_cb, &rt, wake)));
}

fn fire(weak: &Weak<RefCell<Inner>>, runtime: &Runtime, wake: Wake) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let now = runtime.now();
    let hook = {
        let mut inner = shared.borrow_mut();
        match wake {
            Wake::Event(event) => {
                if event == RevealEvent::Tick {
                    inner.ticks += 1;
                }
                inner.apply(event, now);
                // A line that is already full (including an empty line) completes at the
                // same instant, so the pause starts right after the last character.
                if inner.state.is_line_full(&inner.script) {
                    inner.apply(RevealEvent::LineFilled, now);
                }
                None
            }
            Wake::Booted => {
                inner.booted = true;
                tracing::debug!(at = %now, "boot sequence settled");
                inner.on_booted.take()
            }
        }
    };
    drop(shared);
    if let Some(hook) = hook {
        hook();
    }
    arm(weak, runtime);
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/sequencer.rs"]
mod tests;
