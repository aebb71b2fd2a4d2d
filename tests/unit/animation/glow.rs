use super::*;

#[test]
fn idle_pulse_is_dark() {
    let g = GlowPulse::new(2000.0);
    assert_eq!(g.intensity(0.0), 0.0);
    assert!(!g.is_active());
}

#[test]
fn decays_linearly_and_monotonically_to_zero() {
    let mut g = GlowPulse::new(2000.0);
    g.trigger(1000.0);
    assert_eq!(g.intensity(1000.0), 1.0);
    assert!((g.intensity(2000.0) - 0.5).abs() < 1e-12);

    let mut prev = 1.0;
    let mut t = 1000.0;
    while t <= 3500.0 {
        let v = g.intensity(t);
        assert!(v <= prev);
        prev = v;
        t += 16.0;
    }
    assert_eq!(g.intensity(3000.0), 0.0);
    assert_eq!(g.intensity(10_000.0), 0.0);
}

#[test]
fn settle_clears_only_after_decay() {
    let mut g = GlowPulse::new(100.0);
    g.trigger(0.0);
    g.settle(50.0);
    assert!(g.is_active());
    g.settle(100.0);
    assert!(!g.is_active());
}

#[test]
fn retrigger_restarts_from_full() {
    let mut g = GlowPulse::new(100.0);
    g.trigger(0.0);
    g.trigger(80.0);
    assert_eq!(g.intensity(80.0), 1.0);
    assert!((g.intensity(130.0) - 0.5).abs() < 1e-12);
}

#[test]
fn zero_or_invalid_duration_decays_instantly() {
    for d in [0.0, -5.0, f64::NAN] {
        let mut g = GlowPulse::new(d);
        g.trigger(10.0);
        assert_eq!(g.intensity(10.0), 1.0);
        assert_eq!(g.intensity(10.5), 0.0);
    }
}
