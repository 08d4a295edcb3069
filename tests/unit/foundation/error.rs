use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BubblelineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BubblelineError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        BubblelineError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        BubblelineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BubblelineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: BubblelineError = serde_json::from_str::<f64>("nope").unwrap_err().into();
    assert!(matches!(err, BubblelineError::Serde(_)));
}
