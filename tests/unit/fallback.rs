use super::*;
use crate::config::presets;

#[test]
fn exposes_description_as_accessible_label() {
    let cfg = presets::ai_flow();
    let fb = StaticFallback::build(&cfg).unwrap();
    assert_eq!(fb.aria_label(), "AI to Robotics Flow Diagram");
    assert!(fb.svg().contains(r#"role="img""#));
    assert!(fb.svg().contains(r#"aria-label="AI to Robotics Flow Diagram""#));
    assert!(fb.svg().contains("<title>AI to Robotics Flow Diagram</title>"));
}

#[test]
fn escapes_markup_in_text() {
    let mut cfg = presets::ai_flow();
    cfg.description = r#"Robots & "agents" <live>"#.to_owned();
    let fb = StaticFallback::build(&cfg).unwrap();
    assert_eq!(fb.aria_label(), cfg.description);
    assert!(fb.svg().contains("Robots &amp; &quot;agents&quot; &lt;live&gt;"));
    fb.to_tree().unwrap();
}

#[test]
fn every_preset_parses_with_the_configured_view_box() {
    for name in crate::config::presets::PRESET_NAMES {
        let cfg = presets::preset(name).unwrap();
        let fb = StaticFallback::build(&cfg).unwrap();
        let tree = fb.to_tree().unwrap();
        let [w, h] = cfg.fallback.view_box;
        assert_eq!(tree.size().width(), w as f32, "{name}");
        assert_eq!(tree.size().height(), h as f32, "{name}");
        assert_eq!(fb.view_box(), [w, h]);
    }
}

#[test]
fn draws_one_gradient_route_per_resolvable_route() {
    let cfg = presets::ai_flow();
    let svg = StaticFallback::build(&cfg).unwrap().svg().to_owned();
    assert_eq!(svg.matches("<linearGradient").count(), cfg.routes.len());
    assert_eq!(svg.matches("stroke=\"url(#route-").count(), cfg.routes.len());
    assert!(svg.matches("<circle").count() >= cfg.nodes.count);
}

#[test]
fn build_is_deterministic() {
    let cfg = presets::digital_twins();
    assert_eq!(
        StaticFallback::build(&cfg).unwrap(),
        StaticFallback::build(&cfg).unwrap()
    );
}

#[test]
fn rasterizes_to_a_painted_premultiplied_frame() {
    let fb = StaticFallback::build(&presets::mcp_ros2()).unwrap();
    let frame = fb.rasterize(450, 250).unwrap();
    assert_eq!((frame.width, frame.height), (450, 250));
    assert_eq!(frame.data.len(), 450 * 250 * 4);
    assert!(frame.premultiplied);
    assert!(frame.painted_pixels() > 0);
}
