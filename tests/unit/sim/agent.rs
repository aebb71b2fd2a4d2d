use super::*;

#[test]
fn activation_spikes_then_decays_linearly() {
    let mut a = Agent::new(Some(AgentKind::Drone), Point::new(0.75, 0.25), AGENT_RADIUS, 2000.0);
    a.place(800.0, 400.0);
    assert_eq!(a.pos, Point::new(600.0, 100.0));
    assert_eq!(a.scale, 1.0);

    a.activate(1000.0);
    assert_eq!(a.glow, 1.0);
    assert!((a.scale - 1.2).abs() < 1e-12);

    a.sample(2000.0);
    assert!((a.glow - 0.5).abs() < 1e-12);
    assert!((a.scale - 1.1).abs() < 1e-12);

    a.sample(3000.0);
    assert_eq!(a.glow, 0.0);
    assert_eq!(a.scale, 1.0);
    assert_eq!(a.glow_at(3500.0), 0.0);
}

#[test]
fn hub_has_no_icon_kind() {
    let hub = Agent::new(None, Point::new(0.5, 0.5), 20.0, 2000.0);
    assert!(hub.is_hub());
    assert_eq!(hub.glow_at(0.0), 0.0);
}
