use super::*;
use crate::field::generator::AttrRange;

fn rain(source: GlyphSource) -> GlyphRainSpec {
    GlyphRainSpec {
        columns: FieldSpec::scattered(50)
            .with_duration(AttrRange::span(10.0, 10.0))
            .with_delay(AttrRange::span(0.0, 5.0)),
        glyphs_per_column: 30,
        source,
    }
}

#[test]
fn random_glyphs_come_from_charset_and_are_fixed_per_seed() {
    let spec = rain(GlyphSource::Random {
        charset: MATRIX_CHARSET.to_string(),
    });
    let a = generate_glyph_columns(&spec, 11).unwrap();
    let b = generate_glyph_columns(&spec, 11).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 50);
    for col in &a {
        assert_eq!(col.glyphs.chars().count(), 30);
        assert!(col.glyphs.chars().all(|c| MATRIX_CHARSET.contains(c)));
    }
}

#[test]
fn alternating_glyphs_start_with_one() {
    let spec = rain(GlyphSource::Alternating);
    let cols = generate_glyph_columns(&spec, 0).unwrap();
    assert!(cols.iter().all(|c| c.glyphs.starts_with("1010")));
}

#[test]
fn empty_charset_is_a_configuration_error() {
    let spec = rain(GlyphSource::Random {
        charset: String::new(),
    });
    assert!(matches!(
        generate_glyph_columns(&spec, 0),
        Err(MotionError::Configuration(_))
    ));
}
