use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#00FFFF")).unwrap();
    assert_eq!(c, Rgba8::rgb(0, 255, 255));

    let c: Rgba8 = serde_json::from_value(json!("#8a2be280")).unwrap();
    assert_eq!(c, Rgba8::rgba(138, 43, 226, 128));

    assert!(serde_json::from_value::<Rgba8>(json!("#123")).is_err());
}

#[test]
fn parses_css_like_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 0, "g": 212, "b": 255, "a": 0.5})).unwrap();
    assert_eq!(c, Rgba8::rgba(0, 212, 255, 128));

    let c: Rgba8 = serde_json::from_value(json!([255, 140, 0])).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 140, 0));
}

#[test]
fn parses_hsla_object() {
    let c: Rgba8 = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));
}

#[test]
fn serializes_as_hex() {
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(0, 128, 255)).unwrap(),
        json!("#0080ff")
    );
    assert_eq!(
        serde_json::to_value(Rgba8::rgba(0, 128, 255, 16)).unwrap(),
        json!("#0080ff10")
    );
}

#[test]
fn with_opacity_scales_alpha() {
    let c = Rgba8::rgb(10, 20, 30).with_opacity(0.5);
    assert_eq!(c.a, 128);
    assert_eq!(Rgba8::rgb(1, 2, 3).with_opacity(f64::NAN).a, 0);
}
