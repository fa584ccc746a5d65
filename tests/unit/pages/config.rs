use super::*;
use crate::pages::presets::preset;

#[test]
fn page_ids_parse_from_names_numbers_and_routes() {
    assert_eq!("two".parse::<PageId>().unwrap(), PageId::Two);
    assert_eq!("7".parse::<PageId>().unwrap(), PageId::Seven);
    assert_eq!("portfolio-four".parse::<PageId>().unwrap(), PageId::Four);
    assert_eq!(" Five ".parse::<PageId>().unwrap(), PageId::Five);
    assert!("eight".parse::<PageId>().is_err());
    assert!("0".parse::<PageId>().is_err());
    assert_eq!(PageId::Three.route(), "/portfolio-three");
}

#[test]
fn glitch_pulse_defaults_and_validation() {
    let g = GlitchPulse::default();
    assert_eq!((g.period_ms, g.active_ms), (5000, 100));
    assert!(g.validate().is_ok());
    assert!(
        GlitchPulse {
            period_ms: 100,
            active_ms: 100
        }
        .validate()
        .is_err()
    );
}

#[test]
fn duplicate_layer_names_are_rejected() {
    let mut page = preset(PageId::One).unwrap();
    let dup = page.layers[0].clone();
    page.layers.push(dup);
    let err = page.validate().unwrap_err();
    assert!(matches!(err, MotionError::Configuration(_)));
}

#[test]
fn nested_records_are_checked() {
    let mut page = preset(PageId::Four).unwrap();
    if let Some(grid) = page.grid_warp.as_mut() {
        grid.spacing = 0.0;
    }
    assert!(page.validate().is_err());

    let mut page = preset(PageId::Three).unwrap();
    if let Some(cursor) = page.cursor.as_mut() {
        cursor.spring.stiffness = -1.0;
    }
    assert!(page.validate().is_err());

    let mut page = preset(PageId::Six).unwrap();
    page.title = "  ".to_string();
    assert!(page.validate().is_err());
}

#[test]
fn json_with_invalid_map_fails_to_load() {
    let mut value = serde_json::to_value(preset(PageId::Six).unwrap()).unwrap();
    value["parallax"][0]["map"]["stops"] = serde_json::json!([0.2, 0.1]);
    let err = PageConfig::from_json(&value.to_string()).unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)), "{err}");
}

#[test]
fn minimal_json_fills_defaults() {
    let json = r#"{
        "id": "six",
        "title": "Plain",
        "theme": "Brutalist Minimal",
        "description": "",
        "background": { "r": 255, "g": 255, "b": 255, "a": 255 }
    }"#;
    let page = PageConfig::from_json(json).unwrap();
    assert!(page.layers.is_empty());
    assert!(page.boot.is_none());
    assert_eq!(page.seed, None);
}
