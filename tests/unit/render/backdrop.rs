use super::*;
use crate::field::generator::AttrRange;
use crate::field::glyphs::GlyphSource;
use crate::foundation::core::Viewport;
use crate::render::surface::CpuSurface;

fn stars(count: usize) -> BackdropLayer {
    BackdropLayer::new(
        "stars",
        LayerKind::Stars {
            field: FieldSpec::scattered(count)
                .with_size(AttrRange::span(0.5, 0.5))
                .with_duration(AttrRange::span(2.0, 3.0))
                .with_delay(AttrRange::span(0.0, 2.0)),
            color: Rgba8::opaque(255, 255, 255),
            radius: 2.0,
            opacity: LoopTrack::new(vec![0.2, 1.0, 0.2], 1000).unwrap(),
            scale: LoopTrack::new(vec![1.0, 1.5, 1.0], 1000).unwrap(),
        },
    )
}

fn binary_rain() -> BackdropLayer {
    BackdropLayer::new(
        "rain",
        LayerKind::GlyphRain {
            rain: GlyphRainSpec {
                columns: FieldSpec::scattered(4).with_duration(AttrRange::span(10.0, 10.0)),
                glyphs_per_column: 6,
                source: GlyphSource::Alternating,
            },
            color: Rgba8::opaque(0, 255, 0),
            cell: 12.0,
            fall: LoopTrack::new(vec![0.0, 1.0], 1000).unwrap(),
            lane_pct: Some(5.0),
        },
    )
}

#[test]
fn fields_are_generated_once_per_backdrop() {
    let b = Backdrop::new(&[stars(100), binary_rain()], 7).unwrap();
    assert_eq!(b.generations(), 2);
    let a = b.field("stars").unwrap();
    let again = b.field("stars").unwrap();
    assert!(Rc::ptr_eq(&a, &again));
    assert_eq!(a.len(), 100);
    assert_eq!(b.glyph_columns("rain").unwrap()[0].glyphs, "101010");
    assert!(b.field("rain").is_none());
    assert_eq!(b.generations(), 2);
}

#[test]
fn seed_determines_fields() {
    let a = Backdrop::new(&[stars(20)], 1).unwrap();
    let b = Backdrop::new(&[stars(20)], 1).unwrap();
    let c = Backdrop::new(&[stars(20)], 2).unwrap();
    assert_eq!(&*a.field("stars").unwrap(), &*b.field("stars").unwrap());
    assert_ne!(&*a.field("stars").unwrap(), &*c.field("stars").unwrap());
}

#[test]
fn empty_field_paints_nothing() {
    let b = Backdrop::new(&[stars(0)], 3).unwrap();
    let mut s = CpuSurface::new(Viewport::new(64, 64).unwrap()).unwrap();
    s.draw(Rgba8::new(0, 0, 0, 0), |p| b.paint(p, &BackdropInput::default()));
    assert_eq!(s.frame().covered_pixels(), 0);
}

#[test]
fn stars_reach_the_surface() {
    let b = Backdrop::new(&[stars(100)], 3).unwrap();
    let mut s = CpuSurface::new(Viewport::new(128, 96).unwrap()).unwrap();
    let input = BackdropInput {
        time: Millis(2500),
        ..BackdropInput::default()
    };
    s.draw(Rgba8::new(0, 0, 0, 0), |p| b.paint(p, &input));
    assert!(s.frame().covered_pixels() > 0);
}

#[test]
fn zero_layer_opacity_hides_layer() {
    let b = Backdrop::new(&[stars(100).with_opacity(0.0)], 3).unwrap();
    let mut s = CpuSurface::new(Viewport::new(64, 64).unwrap()).unwrap();
    s.draw(Rgba8::new(0, 0, 0, 0), |p| b.paint(p, &BackdropInput::default()));
    assert_eq!(s.frame().covered_pixels(), 0);

    let b = Backdrop::new(&[stars(100)], 3).unwrap();
    let mut input = BackdropInput::default();
    input.transforms.insert(
        "stars".to_string(),
        LayerTransform {
            opacity: 0.0,
            ..LayerTransform::default()
        },
    );
    s.draw(Rgba8::new(0, 0, 0, 0), |p| b.paint(p, &input));
    assert_eq!(s.frame().covered_pixels(), 0);
}

#[test]
fn scanlines_leave_first_half_period_clear() {
    let layer = BackdropLayer::new(
        "crt",
        LayerKind::Scanlines {
            period: 4.0,
            color: Rgba8::opaque(0, 255, 0),
        },
    );
    let b = Backdrop::new(&[layer], 0).unwrap();
    let mut s = CpuSurface::new(Viewport::new(8, 8).unwrap()).unwrap();
    s.draw(Rgba8::new(0, 0, 0, 0), |p| b.paint(p, &BackdropInput::default()));
    let frame = s.frame();
    assert_eq!(frame.pixel(1, 0).map(|px| px[3]), Some(0));
    assert_eq!(frame.pixel(1, 2).map(|px| px[3]), Some(255));
    assert_eq!(frame.pixel(1, 4).map(|px| px[3]), Some(0));
    assert_eq!(frame.pixel(1, 6).map(|px| px[3]), Some(255));
}

#[test]
fn invalid_layers_are_configuration_errors() {
    let mut bad = stars(10);
    bad.name = " ".to_string();
    assert!(matches!(
        Backdrop::new(&[bad], 0),
        Err(MotionError::Configuration(_))
    ));

    let mut bad = stars(10);
    if let LayerKind::Stars { radius, .. } = &mut bad.kind {
        *radius = 0.0;
    }
    let err = bad.validate().unwrap_err().to_string();
    assert!(err.contains("layer 'stars'"), "{err}");

    let mut bad = stars(10);
    bad.opacity = 1.5;
    assert!(bad.validate().is_err());
}

#[test]
fn layer_json_is_tagged_by_kind() {
    let json = r#"{ "name": "grid", "kind": "grid_pattern", "spacing": 30.0,
                   "color": { "r": 16, "g": 185, "b": 129, "a": 77 } }"#;
    let layer: BackdropLayer = serde_json::from_str(json).unwrap();
    assert_eq!(layer.opacity, 1.0);
    assert_eq!(layer.kind.kind_name(), "grid_pattern");
    let back = serde_json::to_value(&layer).unwrap();
    assert_eq!(back["kind"], "grid_pattern");
}
