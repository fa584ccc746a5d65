use super::*;

fn cursor() -> CursorSpring {
    CursorSpring::new(
        SpringConfig {
            stiffness: 700.0,
            damping: 25.0,
        },
        Vec2::new(16.0, 16.0),
        Point::new(-100.0, -100.0),
    )
    .unwrap()
}

#[test]
fn target_is_offset_by_hotspot() {
    let mut c = cursor();
    c.set_pointer(Point::new(216.0, 116.0));
    assert_eq!(c.target(), Point::new(200.0, 100.0));
}

#[test]
fn converges_to_target() {
    let mut c = cursor();
    c.set_pointer(Point::new(216.0, 116.0));
    for _ in 0..120 {
        c.step(Millis(16));
    }
    assert!((c.position() - c.target()).hypot() < 0.5);
}

#[test]
fn first_frame_moves_toward_target_without_jumping() {
    let mut c = cursor();
    c.set_pointer(Point::new(116.0, -84.0));
    let before = (c.position() - c.target()).hypot();
    c.step(Millis(16));
    let after = (c.position() - c.target()).hypot();
    assert!(after < before);
    assert!(after > 0.0);
}

#[test]
fn at_rest_snaps_and_stays() {
    let mut c = cursor();
    c.step(Millis(16));
    assert!(c.is_at_rest());
    assert_eq!(c.position(), Point::new(-100.0, -100.0));
}

#[test]
fn invalid_config_is_rejected() {
    let bad = SpringConfig {
        stiffness: 0.0,
        damping: 1.0,
    };
    assert!(CursorSpring::new(bad, Vec2::ZERO, Point::ORIGIN).is_err());
}

#[test]
fn non_finite_pointer_keeps_previous_target() {
    let mut c = cursor();
    c.set_pointer(Point::new(50.0, 50.0));
    let target = c.target();
    c.set_pointer(Point::new(f64::NAN, 10.0));
    c.set_pointer(Point::new(f64::INFINITY, 10.0));
    assert_eq!(c.target(), target);
    c.step(Millis(16));
    assert!(c.position().is_finite());
}
