use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PulseError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PulseError::config("x").to_string().contains("config error:"));
    assert!(
        PulseError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(PulseError::render("x").to_string().contains("render error:"));
    assert!(
        PulseError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PulseError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
