use super::*;

#[test]
fn measured_viewport_rejects_empty_layout() {
    assert!(Viewport::measured(0.0, 400.0, 1.0, 2.0).is_none());
    assert!(Viewport::measured(800.0, 0.0, 1.0, 2.0).is_none());
    assert!(Viewport::measured(f64::NAN, 400.0, 1.0, 2.0).is_none());
}

#[test]
fn measured_viewport_caps_and_sanitizes_dpr() {
    let v = Viewport::measured(800.0, 400.0, 3.0, 2.0).unwrap();
    assert_eq!(v.dpr, 2.0);
    assert_eq!(v.pixel_width(), 1600);
    assert_eq!(v.pixel_height(), 800);

    let v = Viewport::measured(800.0, 400.0, 0.0, 2.0).unwrap();
    assert_eq!(v.dpr, 1.0);
}

#[test]
fn viewport_new_validates() {
    assert!(Viewport::new(10.0, 10.0, 1.0).is_ok());
    assert!(Viewport::new(-1.0, 10.0, 1.0).is_err());
    assert!(Viewport::new(10.0, 10.0, f64::INFINITY).is_err());
}

#[test]
fn rng_is_deterministic_and_bounded() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..100 {
        let x = a.next_f64_01();
        assert_eq!(x, b.next_f64_01());
        assert!((0.0..1.0).contains(&x));
    }
    for _ in 0..100 {
        assert!(a.index(3) < 3);
    }
}

#[test]
fn premul_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
    assert_eq!(c.a, 128);
}
