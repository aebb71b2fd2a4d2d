use super::*;

#[test]
fn icons_fit_the_unit_box() {
    for kind in [AgentKind::Drone, AgentKind::Rover, AgentKind::Arm] {
        let bb = icon_path(kind).bounding_box();
        assert!(bb.width() > 0.5, "{kind:?} is degenerate");
        assert!(bb.x0 >= -1.0 && bb.y0 >= -1.0, "{kind:?} {bb:?}");
        assert!(bb.x1 <= 1.0 && bb.y1 <= 1.0, "{kind:?} {bb:?}");
    }
}

#[test]
fn svg_data_is_non_empty_path_syntax() {
    let d = icon_svg(AgentKind::Rover);
    assert!(d.starts_with('M'));
    assert!(d.contains('Z'));
}
