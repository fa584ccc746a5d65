use super::*;
use crate::foundation::error::MotionError;
use crate::pages::presets::preset;

struct NoSurface;

impl SurfaceSource for NoSurface {
    fn acquire(&mut self, _viewport: Viewport) -> MotionResult<CpuSurface> {
        Err(MotionError::resource_unavailable("no 2d context"))
    }
}

fn runtime() -> Runtime {
    Runtime::new(Viewport::new(160, 120).unwrap())
}

fn pinned(id: PageId, seed: u64) -> PageConfig {
    let mut config = preset(id).unwrap();
    config.seed = Some(seed);
    config
}

#[test]
fn mount_and_unmount_leave_runtime_clean() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::One, 1), &rt).unwrap();
    assert!(view.is_mounted());
    // scroll, pointer, resize + canvas resize and pointer
    assert_eq!(rt.listener_count(), 5);
    // spring loop + canvas loop
    assert_eq!(rt.pending_tasks(), 2);

    rt.advance_to(Millis(100));
    view.unmount();
    assert_eq!(rt.listener_count(), 0);
    assert_eq!(rt.pending_tasks(), 0);
    rt.advance_to(Millis(1_000));
}

#[test]
fn every_preset_mounts_and_releases() {
    let rt = runtime();
    for id in PageId::ALL {
        let view = PageView::mount(pinned(id, 3), &rt).unwrap();
        rt.advance_by(Millis(250));
        drop(view);
        assert_eq!(rt.listener_count(), 0, "{id}");
        assert_eq!(rt.pending_tasks(), 0, "{id}");
    }
}

#[test]
fn fields_are_generated_once_per_mount() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::One, 9), &rt).unwrap();
    let stars = view.backdrop().field("stars").unwrap();
    let generations = view.backdrop().generations();
    rt.dispatch(Signal::Resize(Viewport::new(200, 100).unwrap()));
    rt.dispatch(Signal::PointerMove(Point::new(10.0, 10.0)));
    rt.advance_to(Millis(500));
    assert_eq!(view.backdrop().generations(), generations);
    assert!(Rc::ptr_eq(&stars, &view.backdrop().field("stars").unwrap()));
    assert_eq!(stars.len(), 100);
}

#[test]
fn pinned_seed_reproduces_fields() {
    let rt = runtime();
    let a = PageView::mount(pinned(PageId::Seven, 42), &rt).unwrap();
    let b = PageView::mount(pinned(PageId::Seven, 42), &rt).unwrap();
    assert_eq!(a.seed(), 42);
    assert_eq!(
        a.backdrop().field("bubbles").unwrap(),
        b.backdrop().field("bubbles").unwrap()
    );
}

#[test]
fn scroll_drives_parallax_bindings() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::One, 1), &rt).unwrap();
    assert_eq!(view.parallax()["nebula"].offset, Vec2::ZERO);

    rt.dispatch(Signal::Scroll(ScrollProgress::END));
    let nebula = view.parallax()["nebula"];
    assert_eq!(nebula.offset, Vec2::new(-100.0, 200.0));
    assert_eq!(view.parallax()["hero"].opacity, 0.0);
    assert_eq!(view.scroll(), ScrollProgress::END);
}

#[test]
fn parallax_values_group_by_target() {
    let bindings = vec![
        ParallaxBinding::new("a", TransformProperty::Scale, vec![0.0, 1.0], vec![1.0, 2.0])
            .unwrap(),
        ParallaxBinding::new("a", TransformProperty::Opacity, vec![0.0, 1.0], vec![1.0, 0.0])
            .unwrap(),
    ];
    let values = parallax_values(&bindings, ScrollProgress::new(0.5));
    assert_eq!(values.len(), 1);
    assert_eq!(values["a"].scale, 1.5);
    assert_eq!(values["a"].opacity, 0.5);
    assert_eq!(values["a"].offset, Vec2::ZERO);
}

#[test]
fn pointer_parallax_is_smoothed() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::One, 1), &rt).unwrap();
    rt.dispatch(Signal::PointerMove(Point::new(160.0, 120.0)));
    assert_eq!(view.pointer_normalized(), Vec2::new(1.0, 1.0));
    assert_eq!(view.parallax_pointer(), Vec2::ZERO);

    rt.advance_to(Millis(48));
    let early = view.parallax_pointer();
    assert!(early.x > 0.0 && early.x < 1.0);

    rt.advance_to(Millis(3_000));
    let settled = view.parallax_pointer();
    assert!((settled.x - 1.0).abs() < 1e-2);
    assert!((settled.y - 1.0).abs() < 1e-2);
}

#[test]
fn cursor_follows_pointer_minus_hotspot() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::Three, 1), &rt).unwrap();
    assert_eq!(view.cursor_position(), Some(Point::new(-100.0, -100.0)));

    rt.dispatch(Signal::PointerMove(Point::new(100.0, 60.0)));
    rt.advance_to(Millis(2_000));
    let p = view.cursor_position().unwrap();
    assert!((p.x - 84.0).abs() < 0.5, "{p:?}");
    assert!((p.y - 44.0).abs() < 0.5, "{p:?}");
}

#[test]
fn pages_without_cursor_report_none() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::Six, 1), &rt).unwrap();
    assert_eq!(view.cursor_position(), None);
    assert!(view.is_booted());
    assert!(view.boot_state().is_none());
}

#[test]
fn glitch_pulses_on_interval() {
    let rt = runtime();
    let view = PageView::mount_with_source(pinned(PageId::Five, 1), &rt, &mut NoSurface).unwrap();
    assert!(!view.glitch_active());
    rt.advance_to(Millis(4_999));
    assert!(!view.glitch_active());
    rt.advance_to(Millis(5_000));
    assert!(view.glitch_active());
    rt.advance_to(Millis(5_099));
    assert!(view.glitch_active());
    rt.advance_to(Millis(5_100));
    assert!(!view.glitch_active());
    rt.advance_to(Millis(10_000));
    assert!(view.glitch_active());
}

#[test]
fn terminal_page_boots() {
    let rt = runtime();
    let config = pinned(PageId::Two, 1);
    let boot = config.boot.clone().unwrap();
    let done = boot.timing.completion_time(&boot.script);
    let view = PageView::mount_with_source(config, &rt, &mut NoSurface).unwrap();
    assert!(!view.is_booted());

    rt.advance_to(done);
    assert_eq!(view.boot_state(), Some(RevealState::SequenceComplete));
    assert_eq!(view.boot_transcript().len(), boot.script.len());
    assert!(!view.is_booted());

    rt.advance_to(done + Millis(boot.timing.settle_ms));
    assert!(view.is_booted());
}

#[test]
fn missing_surface_still_mounts() {
    let rt = runtime();
    let view = PageView::mount_with_source(pinned(PageId::Four, 1), &rt, &mut NoSurface).unwrap();
    let canvas = view.canvas().unwrap();
    assert!(!canvas.is_active());
    rt.advance_to(Millis(200));
    assert_eq!(canvas.frames_drawn(), 0);
    assert!(view.backdrop().glyph_columns("binary-rain").is_some());
}

#[test]
fn canvas_draws_page_frames() {
    let rt = runtime();
    let view = PageView::mount(pinned(PageId::Four, 1), &rt).unwrap();
    rt.advance_to(Millis(32));
    let canvas = view.canvas().unwrap();
    assert_eq!(canvas.frames_drawn(), 2);
    let frame = canvas.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (160, 120));
    assert!(frame.covered_pixels() > 0);
}

#[test]
fn invalid_config_is_rejected() {
    let rt = runtime();
    let mut config = preset(PageId::One).unwrap();
    config.title = " ".into();
    let err = PageView::mount(config, &rt).unwrap_err();
    assert!(matches!(err, MotionError::Configuration(_)));
    assert_eq!(rt.listener_count(), 0);
    assert_eq!(rt.pending_tasks(), 0);
}

#[test]
fn render_still_is_deterministic() {
    let config = preset(PageId::One).unwrap();
    let vp = Viewport::new(64, 48).unwrap();
    let a = render_still(&config, vp, Millis(500), None, ScrollProgress::START, 5).unwrap();
    let b = render_still(&config, vp, Millis(500), None, ScrollProgress::START, 5).unwrap();
    assert_eq!(a.data, b.data);
    assert_eq!(a.pixel(0, 0).map(|p| p[3]), Some(255));
}

#[test]
fn zero_sized_viewport_does_not_poison_springs() {
    let rt = Runtime::new(Viewport::new(200, 100).unwrap());
    let view = PageView::mount(pinned(PageId::One, 1), &rt).unwrap();
    let empty = Viewport {
        width: 0,
        height: 0,
    };
    rt.dispatch(Signal::Resize(empty));
    rt.dispatch(Signal::PointerMove(Point::ORIGIN));
    rt.advance_by(Millis(32));
    assert!(view.parallax_pointer().is_finite());
    assert!(!view.canvas().unwrap().is_active());

    rt.dispatch(Signal::Resize(Viewport::new(200, 100).unwrap()));
    rt.dispatch(Signal::PointerMove(Point::new(150.0, 20.0)));
    rt.advance_by(Millis(2_000));
    assert_eq!(view.pointer_normalized(), Vec2::new(0.5, -0.6));
    let p = view.parallax_pointer();
    assert!((p.x - 0.5).abs() < 1e-2, "{p:?}");
    assert!((p.y + 0.6).abs() < 1e-2, "{p:?}");
    assert!(view.canvas().unwrap().is_active());
}
