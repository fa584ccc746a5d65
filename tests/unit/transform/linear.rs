use super::*;

#[test]
fn endpoints_map_to_range_endpoints() {
    for (a, b) in [(0.0, 200.0), (0.0, -100.0), (1.0, 0.8), (-3.0, 3.0)] {
        assert_eq!(map_signal(0.0, [0.0, 1.0], [a, b]), a);
        assert_eq!(map_signal(1.0, [0.0, 1.0], [a, b]), b);
    }
}

#[test]
fn monotonic_between_endpoints() {
    let mut prev = map_signal(0.0, [0.0, 1.0], [0.0, 200.0]);
    for i in 1..=100 {
        let v = map_signal(i as f64 / 100.0, [0.0, 1.0], [0.0, 200.0]);
        assert!(v > prev);
        prev = v;
    }

    let mut prev = map_signal(0.0, [0.0, 1.0], [0.0, -200.0]);
    for i in 1..=100 {
        let v = map_signal(i as f64 / 100.0, [0.0, 1.0], [0.0, -200.0]);
        assert!(v < prev);
        prev = v;
    }
}

#[test]
fn clamps_outside_domain_unless_extended() {
    assert_eq!(map_signal(0.5, [0.0, 0.2], [1.0, 0.0]), 0.0);
    assert_eq!(map_signal(-1.0, [0.0, 0.2], [1.0, 0.0]), 1.0);
    assert_eq!(
        map_signal_with(2.0, [0.0, 1.0], [0.0, 10.0], Extrapolate::Extend),
        20.0
    );
}

#[test]
fn degenerate_domain_steps() {
    assert_eq!(map_signal(0.0, [0.5, 0.5], [1.0, 2.0]), 1.0);
    assert_eq!(map_signal(0.5, [0.5, 0.5], [1.0, 2.0]), 2.0);
    assert!(LinearMap::new([0.5, 0.5], [0.0, 1.0]).is_err());
}

#[test]
fn linear_map_vec2_is_per_axis() {
    let m = LinearMap::new([-1.0, 1.0], [-50.0, 50.0]).unwrap();
    assert_eq!(m.map_vec2(Vec2::new(1.0, -0.5)), Vec2::new(50.0, -25.0));
}

#[test]
fn piecewise_fade_in_out() {
    let m = PiecewiseMap::new(vec![0.15, 0.25, 0.35], vec![0.0, 1.0, 0.0]).unwrap();
    assert_eq!(m.map(0.0), 0.0);
    assert_eq!(m.map(0.15), 0.0);
    assert!((m.map(0.2) - 0.5).abs() < 1e-9);
    assert_eq!(m.map(0.25), 1.0);
    assert!((m.map(0.3) - 0.5).abs() < 1e-9);
    assert_eq!(m.map(0.9), 0.0);
}

#[test]
fn piecewise_rejects_bad_stops() {
    assert!(PiecewiseMap::new(vec![0.0], vec![1.0]).is_err());
    assert!(PiecewiseMap::new(vec![0.0, 1.0], vec![1.0]).is_err());
    assert!(PiecewiseMap::new(vec![0.5, 0.5], vec![0.0, 1.0]).is_err());
    assert!(PiecewiseMap::new(vec![1.0, 0.0], vec![0.0, 1.0]).is_err());
}

#[test]
fn piecewise_json_is_validated() {
    let ok: PiecewiseMap = serde_json::from_str(r#"{"stops":[0,0.2],"outputs":[1,0]}"#).unwrap();
    assert_eq!(ok.map(0.1), 0.5);
    assert!(serde_json::from_str::<PiecewiseMap>(r#"{"stops":[0.2,0],"outputs":[1,0]}"#).is_err());
}
