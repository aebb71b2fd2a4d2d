use super::*;

fn minimal_json() -> &'static str {
    r##"{
        "name": "mini",
        "description": "Minimal flow",
        "nodes": { "count": 4, "region": { "x": 0.1, "y": 0.1, "width": 0.2, "height": 0.5 } },
        "hub": { "at": { "x": 0.5, "y": 0.5 } },
        "routes": [ { "from": "nodes", "to": "hub" } ],
        "spawn": { "kind": "interval", "every_ms": 1000 },
        "palette": {
            "node": "#00FFFF",
            "link": "#00FFFF",
            "hub": "#0080FF",
            "agent": "#00FF7F",
            "particle": "#8A2BE2"
        }
    }"##
}

#[test]
fn json_defaults_fill_optional_fields() {
    let cfg = SurfaceConfig::from_json(minimal_json()).unwrap();
    assert_eq!(cfg.max_dpr, 2.0);
    assert_eq!(cfg.glow_decay_ms, 2000.0);
    assert_eq!(cfg.nodes.radius, [2.0, 5.0]);
    assert_eq!(cfg.hub.as_ref().unwrap().radius, 20.0);
    assert_eq!(cfg.routes[0].curve, PathCurve::Linear);
    assert_eq!(cfg.routes[0].size, 3.0);
    assert_eq!(cfg.ease, Ease::InOutCubic);
    assert_eq!(cfg.fallback.view_box, [800.0, 400.0]);
    assert!(cfg.motes.is_none());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SurfaceConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, PulseError::Serde(_)));
}

#[test]
fn default_config_is_valid() {
    SurfaceConfig::default().validate().unwrap();
}

#[test]
fn rejects_empty_description() {
    let mut cfg = SurfaceConfig::default();
    cfg.description = "   ".to_owned();
    assert!(matches!(cfg.validate(), Err(PulseError::Validation(_))));
}

#[test]
fn rejects_routes_to_missing_anchors() {
    let mut cfg = SurfaceConfig::default();
    cfg.routes.push(Route::new(Anchor::Hub, Anchor::Agent(9)));
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("missing agent 9"), "{err}");
    assert!(err.contains(".to references"), "{err}");

    let mut cfg = SurfaceConfig::default();
    cfg.hub = None;
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("no hub is configured"), "{err}");
}

#[test]
fn rejects_self_loops_except_node_to_node() {
    let mut cfg = SurfaceConfig::default();
    cfg.routes.push(Route::new(Anchor::Hub, Anchor::Hub));
    assert!(cfg.validate().is_err());

    let mut cfg = SurfaceConfig::default();
    cfg.routes.push(Route::new(Anchor::Nodes, Anchor::Nodes));
    cfg.validate().unwrap();
}

#[test]
fn rejects_non_finite_numbers() {
    let mut cfg = SurfaceConfig::default();
    cfg.particle_speed = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = SurfaceConfig::default();
    cfg.routes[0].curve = PathCurve::Quadratic { bend: f64::INFINITY };
    assert!(cfg.validate().is_err());

    let mut cfg = SurfaceConfig::default();
    cfg.agents[0].at = Point::new(f64::NAN, 0.5);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_region_outside_unit_square() {
    let mut cfg = SurfaceConfig::default();
    cfg.nodes.region = Region::new(0.9, 0.1, 0.3, 0.2);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_out_of_range_counts() {
    let mut cfg = SurfaceConfig::default();
    cfg.nodes.count = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = SurfaceConfig::default();
    cfg.max_particles = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = SurfaceConfig::default();
    cfg.spawn = SpawnPolicy::Probability { per_frame: 1.5 };
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_bad_mote_ranges() {
    let mut cfg = crate::config::presets::mcp_ros2();
    cfg.validate().unwrap();
    if let Some(m) = cfg.motes.as_mut() {
        m.life_ms = [500.0, 100.0];
    }
    assert!(cfg.validate().is_err());
}

#[test]
fn mote_anchor_errors_name_the_mote_field() {
    let mut cfg = crate::config::presets::mcp_ros2();
    if let Some(m) = cfg.motes.as_mut() {
        m.anchors[2] = Anchor::Agent(7);
    }
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("motes.anchors[2] references missing agent 7"), "{err}");
    assert!(!err.contains("routes["), "{err}");
}

#[test]
fn region_resolves_against_viewport() {
    let r = Region::new(0.05, 0.2, 0.25, 0.6).to_rect(800.0, 400.0);
    assert!((r.x0 - 40.0).abs() < 1e-9);
    assert!((r.y0 - 80.0).abs() < 1e-9);
    assert!((r.x1 - 240.0).abs() < 1e-9);
    assert!((r.y1 - 320.0).abs() < 1e-9);
}

#[test]
fn from_path_reports_missing_file() {
    let err = SurfaceConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read surface config"));
}

#[test]
fn rejects_non_finite_parallax() {
    let mut cfg = crate::config::presets::digital_twins();
    cfg.validate().unwrap();
    if let Some(p) = cfg.parallax.as_mut() {
        p.hub = f64::INFINITY;
    }
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("parallax.hub"), "{err}");

    let mut cfg = crate::config::presets::digital_twins();
    cfg.parallax = Some(ParallaxSpec {
        strength: -0.1,
        ..ParallaxSpec::default()
    });
    assert!(cfg.validate().is_err());
}
