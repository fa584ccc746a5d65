use super::*;
use crate::foundation::core::Viewport;
use crate::render::surface::CpuSurface;

fn xs(path: &BezPath) -> Vec<f64> {
    path.elements()
        .iter()
        .filter_map(|el| match el {
            kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) => Some(p.x),
            _ => None,
        })
        .collect()
}

#[test]
fn defaults_match_code_canvas_page() {
    let g = GridWarp::default();
    assert_eq!(g.spacing, 40.0);
    assert_eq!(g.sample_step, 5.0);
    assert_eq!((g.line.radius, g.line.max_effect), (100.0, 20.0));
    assert_eq!((g.dot.radius, g.dot.max_effect), (100.0, 4.0));
    assert!(g.validate().is_ok());
    assert!(GridWarp { spacing: 0.0, ..g }.validate().is_err());
}

#[test]
fn line_counts_follow_spacing() {
    let g = GridWarp::default();
    // x = 0, 40, 80 for width 100; y = 0, 40 for height 80.
    let paths = g.line_paths(Vec2::new(100.0, 80.0), None);
    assert_eq!(paths.len(), 3 + 2);
    // 80 / 5 + 1 samples per vertical line.
    assert_eq!(xs(&paths[0]).len(), 17);
}

#[test]
fn lines_are_straight_without_pointer() {
    let g = GridWarp::default();
    let line = g.vertical_line(40.0, 200.0, None);
    assert!(xs(&line).iter().all(|&x| x == 40.0));
    assert!(g.dots(Vec2::new(200.0, 200.0), None).is_empty());
}

#[test]
fn pointer_on_line_pushes_it_by_max_offset() {
    let g = GridWarp::default();
    let line = g.vertical_line(40.0, 200.0, Some(Point::new(40.0, 100.0)));
    let shifted = xs(&line);
    // Sample y = 100 is the 21st sample.
    assert_eq!(shifted[20], 60.0);
    // Far samples are untouched.
    assert_eq!(shifted[0], 40.0);
    assert!(shifted.iter().all(|&x| (40.0..=60.0).contains(&x)));
}

#[test]
fn dots_appear_only_near_pointer() {
    let g = GridWarp::default();
    let dots = g.dots(Vec2::new(400.0, 400.0), Some(Point::new(80.0, 80.0)));
    assert!(!dots.is_empty());
    let center = dots
        .iter()
        .find(|(p, _)| *p == Point::new(80.0, 80.0))
        .map(|(_, r)| *r);
    assert_eq!(center, Some(4.0));
    assert!(dots.iter().all(|(p, r)| p.distance(Point::new(80.0, 80.0)) < 100.0 && *r > 0.0));
}

#[test]
fn draws_onto_surface() {
    let mut s = CpuSurface::new(Viewport::new(120, 80).unwrap()).unwrap();
    let g = GridWarp::default();
    s.draw(Rgba8::new(0, 0, 0, 0), |p| g.draw(p, Some(Point::new(40.0, 40.0))));
    let frame = s.frame();
    assert!(frame.covered_pixels() > 0);
    assert!(frame.pixel(40, 40).is_some_and(|px| px[3] > 0));
}
