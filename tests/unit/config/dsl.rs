use super::*;
use crate::config::model::Region;

fn field() -> NodeFieldSpec {
    NodeFieldSpec {
        count: 6,
        region: Region::new(0.05, 0.2, 0.25, 0.6),
        radius: [2.0, 5.0],
        opacity: [0.3, 0.7],
        pulse_rate: 3.0,
        link_distance: 80.0,
        link_probability: 0.3,
    }
}

#[test]
fn builds_a_hub_relay_topology() {
    let cfg = SurfaceConfigBuilder::new("custom", "Custom flow", field())
        .seed(7)
        .hub(Point::new(0.5, 0.5), 18.0)
        .agent(AgentKind::Drone, Point::new(0.8, 0.3))
        .agent(AgentKind::Arm, Point::new(0.8, 0.7))
        .relay_through_hub()
        .spawn(SpawnPolicy::Interval { every_ms: 500.0 })
        .build()
        .unwrap();

    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.routes.len(), 3);
    assert_eq!(cfg.routes[2].to, Anchor::Agent(1));
    assert!(cfg.has_source_routes());
}

#[test]
fn build_runs_validation() {
    let res = SurfaceConfigBuilder::new("broken", "Broken flow", field())
        .route(Route::new(Anchor::Nodes, Anchor::Hub))
        .build();
    assert!(res.is_err());

    let res = SurfaceConfigBuilder::new("bad-dpr", "Bad dpr", field())
        .max_dpr(0.0)
        .build();
    assert!(res.is_err());
}

#[test]
fn from_config_keeps_preset_values() {
    let base = crate::config::presets::mcp_ros2();
    let cfg = SurfaceConfigBuilder::from_config(base.clone())
        .max_particles(8)
        .build()
        .unwrap();
    assert_eq!(cfg.max_particles, 8);
    assert_eq!(cfg.motes, base.motes);
}
