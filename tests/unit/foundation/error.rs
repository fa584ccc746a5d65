use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MotionError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        MotionError::resource_unavailable("x")
            .to_string()
            .contains("resource unavailable:")
    );
    assert!(
        MotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MotionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_resource_errors_are_cosmetic() {
    assert!(MotionError::resource_unavailable("no canvas").is_cosmetic());
    assert!(!MotionError::configuration("min > max").is_cosmetic());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err = serde_json::from_str::<u32>("nope").unwrap_err();
    assert!(matches!(MotionError::from(err), MotionError::Serde(_)));
}
