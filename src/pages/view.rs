//! Mounting a page variant on a runtime.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::foundation::{
    core::{Millis, Point, Rgba8, Vec2, Viewport},
    error::MotionResult,
};
use crate::pages::config::{PageConfig, PageId};
use crate::render::{
    backdrop::{Backdrop, BackdropInput, LayerTransform},
    canvas::{CanvasEffect, CanvasScene, FrameInput},
    grid_warp::GridWarp,
    surface::{CpuSurface, CpuSurfaceSource, Frame, Painter, SurfaceSource},
};
use crate::reveal::{sequencer::BootSequencer, state::RevealState};
use crate::runtime::{
    event_loop::Runtime,
    handle::TaskHandle,
    scope::MountScope,
    signal::{Signal, SignalKind},
};
use crate::transform::{
    pointer::PointerState,
    scroll::{ParallaxBinding, ScrollProgress, TransformProperty},
    spring::CursorSpring,
};

/// Resolve every binding at `progress`, grouped by target.
pub fn parallax_values(
    bindings: &[ParallaxBinding],
    progress: ScrollProgress,
) -> BTreeMap<String, LayerTransform> {
    let mut out: BTreeMap<String, LayerTransform> = BTreeMap::new();
    for binding in bindings {
        let v = binding.value(progress);
        let xf = out.entry(binding.target.clone()).or_default();
        match binding.property {
            TransformProperty::TranslateX => xf.offset.x = v,
            TransformProperty::TranslateY => xf.offset.y = v,
            TransformProperty::Scale => xf.scale = v,
            TransformProperty::Opacity => xf.opacity = v,
        }
    }
    out
}

fn paint_page(
    painter: &mut Painter<'_>,
    backdrop: &Backdrop,
    grid: Option<&GridWarp>,
    input: &BackdropInput,
    pointer_px: Option<Point>,
) {
    backdrop.paint(painter, input);
    if let Some(grid) = grid {
        grid.draw(painter, Some(pointer_px.unwrap_or(GridWarp::REST_POINTER)));
    }
}

/// Render a page's backdrop at `time` without mounting it.
pub fn render_still(
    config: &PageConfig,
    viewport: Viewport,
    time: Millis,
    pointer: Option<Point>,
    scroll: ScrollProgress,
    seed: u64,
) -> MotionResult<Frame> {
    config.validate()?;
    let backdrop = Backdrop::new(&config.layers, seed)?;
    let mut surface = CpuSurface::new(viewport)?;
    let mut state = PointerState::default();
    if let Some(p) = pointer {
        state.update(p);
    }
    let input = BackdropInput {
        time,
        pointer: state.normalized(viewport),
        transforms: parallax_values(&config.parallax, scroll),
    };
    surface.draw(config.background, |p| {
        paint_page(p, &backdrop, config.grid_warp.as_ref(), &input, pointer)
    });
    Ok(surface.frame())
}

struct PageState {
    viewport: Viewport,
    scroll: ScrollProgress,
    pointer: PointerState,
    /// Smoothed normalized pointer for parallax layers.
    parallax_spring: Option<CursorSpring>,
    cursor: Option<CursorSpring>,
    glitch_active: bool,
    glitch_off: Option<TaskHandle>,
    last_step: Millis,
}

impl PageState {
    fn parallax_pointer(&self) -> Vec2 {
        match &self.parallax_spring {
            Some(spring) => spring.position().to_vec2(),
            None => self.pointer.normalized(self.viewport),
        }
    }

    fn on_pointer(&mut self, p: Point) {
        self.pointer.update(p);
        let n = self.pointer.normalized(self.viewport);
        if let Some(spring) = self.parallax_spring.as_mut() {
            spring.set_pointer(n.to_point());
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.set_pointer(p);
        }
    }

    fn step(&mut self, now: Millis) {
        let dt = now.saturating_sub(self.last_step);
        self.last_step = now;
        for spring in [self.parallax_spring.as_mut(), self.cursor.as_mut()]
            .into_iter()
            .flatten()
        {
            spring.step(dt);
        }
    }
}

fn with_state(weak: &Weak<RefCell<PageState>>, f: impl FnOnce(&mut PageState)) {
    if let Some(shared) = weak.upgrade()
        && let Ok(mut state) = shared.try_borrow_mut()
    {
        f(&mut state);
    }
}

struct PageScene {
    id: PageId,
    background: Rgba8,
    backdrop: Rc<Backdrop>,
    grid: Option<GridWarp>,
    bindings: Vec<ParallaxBinding>,
    state: Weak<RefCell<PageState>>,
}

impl CanvasScene for PageScene {
    fn name(&self) -> &'static str {
        self.id.as_str()
    }

    fn background(&self) -> Rgba8 {
        self.background
    }

    fn paint(&mut self, painter: &mut Painter<'_>, frame: &FrameInput) {
        let (scroll, pointer) = match self.state.upgrade() {
            Some(shared) => {
                let state = shared.borrow();
                (state.scroll, state.parallax_pointer())
            }
            None => (ScrollProgress::START, Vec2::ZERO),
        };
        let input = BackdropInput {
            time: frame.time,
            pointer,
            transforms: parallax_values(&self.bindings, scroll),
        };
        paint_page(
            painter,
            &self.backdrop,
            self.grid.as_ref(),
            &input,
            frame.pointer,
        );
    }
}

/// A page variant mounted on a runtime. Dropping it (or [`PageView::unmount`])
/// releases every timer, frame callback and listener it acquired.
pub struct PageView {
    config: Rc<PageConfig>,
    seed: u64,
    backdrop: Rc<Backdrop>,
    state: Rc<RefCell<PageState>>,
    canvas: Option<CanvasEffect>,
    boot: Option<BootSequencer>,
    scope: MountScope,
}

impl std::fmt::Debug for PageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageView")
            .field("id", &self.config.id)
            .field("seed", &self.seed)
            .field("canvas", &self.canvas)
            .field("boot", &self.boot)
            .finish()
    }
}

impl PageView {
    pub fn mount(config: PageConfig, runtime: &Runtime) -> MotionResult<Self> {
        Self::mount_with_source(config, runtime, &mut CpuSurfaceSource)
    }

    /// Validate, generate every field once, register listeners, then start the
    /// canvas, boot sequence and glitch pulse. Only configuration errors fail.
    #[tracing::instrument(skip_all, fields(page = %config.id))]
    pub fn mount_with_source(
        config: PageConfig,
        runtime: &Runtime,
        source: &mut dyn SurfaceSource,
    ) -> MotionResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let backdrop = Rc::new(Backdrop::new(&config.layers, seed)?);
        let config = Rc::new(config);

        let parallax_spring = config
            .pointer_parallax
            .map(|spring| CursorSpring::new(spring, Vec2::ZERO, Point::ORIGIN))
            .transpose()?;
        let cursor = config
            .cursor
            .map(|c| CursorSpring::new(c.spring, c.hotspot, c.start))
            .transpose()?;

        let state = Rc::new(RefCell::new(PageState {
            viewport: runtime.viewport(),
            scroll: ScrollProgress::START,
            pointer: PointerState::default(),
            parallax_spring,
            cursor,
            glitch_active: false,
            glitch_off: None,
            last_step: runtime.now(),
        }));
        if let Some(p) = runtime.pointer() {
            state.borrow_mut().on_pointer(p);
        }

        let mut scope = MountScope::new(format!("page:{}", config.id));
        let weak = Rc::downgrade(&state);

        scope.hold_listener(runtime.listen(SignalKind::Scroll, "page-scroll", {
            let weak = weak.clone();
            move |signal: &Signal| {
                if let Signal::Scroll(progress) = signal {
                    with_state(&weak, |s| s.scroll = *progress);
                }
            }
        }));
        scope.hold_listener(runtime.listen(SignalKind::PointerMove, "page-pointer", {
            let weak = weak.clone();
            move |signal: &Signal| {
                if let Signal::PointerMove(p) = signal {
                    with_state(&weak, |s| s.on_pointer(*p));
                }
            }
        }));
        scope.hold_listener(runtime.listen(SignalKind::Resize, "page-resize", {
            let weak = weak.clone();
            move |signal: &Signal| {
                if let Signal::Resize(vp) = signal {
                    with_state(&weak, |s| s.viewport = *vp);
                }
            }
        }));

        let has_springs = {
            let s = state.borrow();
            s.parallax_spring.is_some() || s.cursor.is_some()
        };
        if has_springs {
            let weak = weak.clone();
            scope.hold_task(
                runtime.start_frame_loop(move |now| with_state(&weak, |s| s.step(now))),
            );
        }

        if let Some(glitch) = config.glitch {
            let weak = weak.clone();
            let rt = runtime.clone();
            scope.hold_task(runtime.set_interval(Millis(glitch.period_ms), move || {
                let off = {
                    let weak = weak.clone();
                    rt.set_timeout(Millis(glitch.active_ms), move || {
                        with_state(&weak, |s| s.glitch_active = false);
                    })
                };
                with_state(&weak, |s| {
                    s.glitch_active = true;
                    s.glitch_off = Some(off);
                });
            }));
        }

        let boot = match &config.boot {
            Some(boot) => Some(BootSequencer::mount(
                runtime,
                boot.script.clone(),
                boot.timing,
            )?),
            None => None,
        };

        let canvas = if config.layers.is_empty() && config.grid_warp.is_none() {
            None
        } else {
            let scene = PageScene {
                id: config.id,
                background: config.background,
                backdrop: Rc::clone(&backdrop),
                grid: config.grid_warp,
                bindings: config.parallax.clone(),
                state: weak,
            };
            Some(CanvasEffect::mount(runtime, source, Box::new(scene)))
        };

        tracing::debug!(seed, layers = config.layers.len(), "page mounted");
        Ok(Self {
            config,
            seed,
            backdrop,
            state,
            canvas,
            boot,
            scope,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn canvas(&self) -> Option<&CanvasEffect> {
        self.canvas.as_ref()
    }

    pub fn scroll(&self) -> ScrollProgress {
        self.state.borrow().scroll
    }

    /// Current value of every scroll binding, keyed by target.
    pub fn parallax(&self) -> BTreeMap<String, LayerTransform> {
        parallax_values(&self.config.parallax, self.scroll())
    }

    /// Raw pointer in `[-1, 1]`.
    pub fn pointer_normalized(&self) -> Vec2 {
        let state = self.state.borrow();
        state.pointer.normalized(state.viewport)
    }

    /// Pointer as seen by parallax layers (spring-smoothed when configured).
    pub fn parallax_pointer(&self) -> Vec2 {
        self.state.borrow().parallax_pointer()
    }

    /// Top-left of the spring cursor ring, when the page has one.
    pub fn cursor_position(&self) -> Option<Point> {
        self.state.borrow().cursor.as_ref().map(CursorSpring::position)
    }

    pub fn boot_state(&self) -> Option<RevealState> {
        self.boot.as_ref().map(BootSequencer::state)
    }

    pub fn boot_transcript(&self) -> Vec<String> {
        self.boot
            .as_ref()
            .map(BootSequencer::transcript)
            .unwrap_or_default()
    }

    /// Pages without a boot sequence count as booted from the start.
    pub fn is_booted(&self) -> bool {
        self.boot.as_ref().is_none_or(BootSequencer::is_booted)
    }

    pub fn glitch_active(&self) -> bool {
        self.state.borrow().glitch_active
    }

    pub fn is_mounted(&self) -> bool {
        !self.scope.is_released()
    }

    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.scope.is_released() {
            return;
        }
        self.scope.release();
        if let Some(canvas) = self.canvas.take() {
            canvas.unmount();
        }
        if let Some(boot) = self.boot.take() {
            boot.unmount();
        }
        self.state.borrow_mut().glitch_off = None;
        tracing::debug!(page = %self.config.id, "page unmounted");
    }
}

impl Drop for PageView {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pages/view.rs"]
mod tests;
