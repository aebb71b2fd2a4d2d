use super::*;

#[test]
fn mote_drifts_and_expires_after_its_life_span() {
    let mut m = Mote {
        pos: Point::new(10.0, 10.0),
        vel: Vec2::new(12.0, -6.0),
        life: 1.0,
        life_span_ms: 1000.0,
        size: 2.0,
        color: Rgba8::rgb(16, 185, 129),
    };
    assert!(m.advance(500.0));
    assert_eq!(m.pos, Point::new(16.0, 7.0));
    assert!((m.life - 0.5).abs() < 1e-12);
    assert!(!m.advance(500.0));
}
