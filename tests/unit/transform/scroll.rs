use super::*;

#[test]
fn progress_is_clamped() {
    assert_eq!(ScrollProgress::new(-0.5).value(), 0.0);
    assert_eq!(ScrollProgress::new(1.5).value(), 1.0);
    assert_eq!(ScrollProgress::new(f64::NAN).value(), 0.0);
}

#[test]
fn container_progress() {
    // 400vh page in a 1000px viewport.
    let p = ScrollProgress::from_container(1500.0, 4000.0, 1000.0);
    assert!((p.value() - 0.5).abs() < 1e-12);
    assert_eq!(
        ScrollProgress::from_container(5000.0, 4000.0, 1000.0),
        ScrollProgress::END
    );
    assert_eq!(
        ScrollProgress::from_container(10.0, 800.0, 1000.0),
        ScrollProgress::START
    );
}

#[test]
fn sun_sinks_and_grid_rises() {
    let y = TransformProperty::TranslateY;
    let sun = ParallaxBinding::new("sun", y, vec![0.0, 1.0], vec![0.0, 200.0]).unwrap();
    let grid = ParallaxBinding::new("grid", y, vec![0.0, 1.0], vec![0.0, -100.0]).unwrap();
    let half = ScrollProgress::new(0.5);
    assert_eq!(sun.value(half), 100.0);
    assert_eq!(grid.value(half), -50.0);
    assert_eq!(sun.value(ScrollProgress::END), 200.0);
}

#[test]
fn hero_fades_in_first_fifth() {
    let fade =
        ParallaxBinding::new("hero", TransformProperty::Opacity, vec![0.0, 0.2], vec![1.0, 0.0])
            .unwrap();
    assert_eq!(fade.value(ScrollProgress::START), 1.0);
    assert!((fade.value(ScrollProgress::new(0.1)) - 0.5).abs() < 1e-12);
    assert_eq!(fade.value(ScrollProgress::new(0.6)), 0.0);
}

#[test]
fn empty_target_is_rejected() {
    let binding =
        ParallaxBinding::new("", TransformProperty::Scale, vec![0.0, 1.0], vec![1.0, 0.8]);
    assert!(binding.is_err());
}
