//! Full-viewport canvas effect: a surface that follows the viewport, redrawn every
//! frame from the latest pointer position.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::foundation::{
    core::{Millis, Point, Rgba8, Viewport},
    error::MotionError,
};
use crate::render::grid_warp::GridWarp;
use crate::render::surface::{CpuSurface, Frame, Painter, SurfaceSource};
use crate::runtime::{
    event_loop::Runtime,
    scope::MountScope,
    signal::{Signal, SignalKind},
};
use crate::transform::pointer::PointerState;

/// Per-frame inputs handed to a [`CanvasScene`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub time: Millis,
    pub viewport: Viewport,
    /// Latest pointer position in pixels; `None` before the first move.
    pub pointer: Option<Point>,
}

/// What a canvas effect draws each frame.
pub trait CanvasScene {
    fn name(&self) -> &'static str;

    fn background(&self) -> Rgba8 {
        Rgba8::new(0, 0, 0, 0)
    }

    fn paint(&mut self, painter: &mut Painter<'_>, input: &FrameInput);
}

impl CanvasScene for GridWarp {
    fn name(&self) -> &'static str {
        "grid-warp"
    }

    fn paint(&mut self, painter: &mut Painter<'_>, input: &FrameInput) {
        self.draw(painter, Some(input.pointer.unwrap_or(GridWarp::REST_POINTER)));
    }
}

struct State {
    surface: Option<CpuSurface>,
    scene: Box<dyn CanvasScene>,
    pointer: PointerState,
    frames_drawn: u64,
    last_frame: Option<Millis>,
    warned: bool,
}

impl State {
    fn degrade(&mut self, err: &MotionError) {
        self.surface = None;
        if !self.warned {
            self.warned = true;
            tracing::warn!(scene = self.scene.name(), %err, "canvas effect disabled");
        }
    }

    /// Resize the held surface, or reacquire one if an earlier resize dropped it.
    fn resize(&mut self, viewport: Viewport) {
        let result = if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport)
        } else {
            CpuSurface::new(viewport).map(|surface| {
                self.surface = Some(surface);
                tracing::debug!(scene = self.scene.name(), "canvas effect restored");
            })
        };
        if let Err(err) = result {
            self.degrade(&err);
        }
    }

    fn draw(&mut self, time: Millis) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let input = FrameInput {
            time,
            viewport: surface.viewport(),
            pointer: self.pointer.position(),
        };
        let scene = &mut self.scene;
        surface.draw(scene.background(), |p| scene.paint(p, &input));
        self.frames_drawn += 1;
        self.last_frame = Some(time);
    }
}

fn with_state(weak: &Weak<RefCell<State>>, f: impl FnOnce(&mut State)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut state) = shared.try_borrow_mut() else {
        tracing::warn!("canvas state busy; callback skipped");
        return;
    };
    f(&mut state);
}

/// A mounted canvas effect. Dropping it (or [`CanvasEffect::unmount`]) stops the frame
/// loop and removes its listeners.
pub struct CanvasEffect {
    state: Rc<RefCell<State>>,
    scope: MountScope,
}

impl std::fmt::Debug for CanvasEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CanvasEffect")
            .field("scene", &state.scene.name())
            .field("active", &state.surface.is_some())
            .field("frames_drawn", &state.frames_drawn)
            .finish()
    }
}

impl CanvasEffect {
    /// Acquire a surface sized to the runtime viewport and start drawing `scene`.
    ///
    /// An unavailable surface is not an error: the effect mounts inactive, logs one
    /// warning and registers nothing.
    #[tracing::instrument(skip_all, fields(scene = scene.name()))]
    pub fn mount(
        runtime: &Runtime,
        source: &mut dyn SurfaceSource,
        scene: Box<dyn CanvasScene>,
    ) -> Self {
        let mut scope = MountScope::new(format!("canvas:{}", scene.name()));
        let mut pointer = PointerState::default();
        if let Some(p) = runtime.pointer() {
            pointer.update(p);
        }
        let state = Rc::new(RefCell::new(State {
            surface: None,
            scene,
            pointer,
            frames_drawn: 0,
            last_frame: None,
            warned: false,
        }));

        match source.acquire(runtime.viewport()) {
            Ok(surface) => state.borrow_mut().surface = Some(surface),
            Err(err) => {
                state.borrow_mut().degrade(&err);
                return Self { state, scope };
            }
        }

        let weak = Rc::downgrade(&state);
        scope.hold_listener(runtime.listen(SignalKind::Resize, "canvas-resize", {
            let weak = weak.clone();
            move |signal: &Signal| {
                if let Signal::Resize(vp) = signal {
                    with_state(&weak, |s| s.resize(*vp));
                }
            }
        }));
        scope.hold_listener(runtime.listen(SignalKind::PointerMove, "canvas-pointer", {
            let weak = weak.clone();
            move |signal: &Signal| {
                if let Signal::PointerMove(p) = signal {
                    with_state(&weak, |s| s.pointer.update(*p));
                }
            }
        }));
        scope.hold_task(runtime.start_frame_loop(move |now| {
            with_state(&weak, |s| s.draw(now));
        }));

        Self { state, scope }
    }

    /// `true` while a surface is held.
    pub fn is_active(&self) -> bool {
        self.state.borrow().surface.is_some()
    }

    pub fn surface_size(&self) -> Option<Viewport> {
        self.state.borrow().surface.as_ref().map(CpuSurface::viewport)
    }

    pub fn frames_drawn(&self) -> u64 {
        self.state.borrow().frames_drawn
    }

    pub fn last_frame(&self) -> Option<Millis> {
        self.state.borrow().last_frame
    }

    /// Pixels of the most recent frame.
    pub fn snapshot(&self) -> Option<Frame> {
        self.state.borrow().surface.as_ref().map(CpuSurface::frame)
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_released()
    }

    pub fn unmount(mut self) {
        self.scope.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
