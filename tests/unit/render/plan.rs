use std::sync::Arc;

use super::*;
use crate::config::presets;

fn sim_for(cfg: SurfaceConfig, viewport: Viewport) -> Simulation {
    Simulation::new(Arc::new(cfg), viewport)
}

#[test]
fn plan_is_sized_in_device_pixels() {
    let vp = Viewport::new(800.0, 400.0, 2.0).unwrap();
    let plan = compile_frame(&sim_for(presets::ai_flow(), vp), vp);
    assert_eq!((plan.width, plan.height), (1600, 800));
    assert_eq!(plan.transform, Affine::scale(2.0));
}

#[test]
fn plan_starts_with_a_clear_to_the_background() {
    let vp = Viewport::new(800.0, 400.0, 1.0).unwrap();
    let plan = compile_frame(&sim_for(presets::enhanced_ai_flow(), vp), vp);
    assert_eq!(
        plan.ops[0],
        DrawOp::Clear {
            color: Rgba8::rgba(15, 20, 25, 242)
        }
    );

    let plan = compile_frame(&sim_for(presets::ai_flow(), vp), vp);
    assert!(matches!(plan.ops[0], DrawOp::Clear { color } if color.a == 0));
}

#[test]
fn every_node_and_particle_is_drawn() {
    let vp = Viewport::new(800.0, 400.0, 1.0).unwrap();
    let mut sim = sim_for(presets::ai_flow(), vp);
    let idle = compile_frame(&sim, vp).ops.len();

    assert!(sim.spawn_on_route(0));
    sim.step(16.0);
    let busy = compile_frame(&sim, vp).ops.len();
    assert_eq!(busy, idle + 2);
}

#[test]
fn glow_adds_rings_around_the_hub() {
    let vp = Viewport::new(800.0, 400.0, 1.0).unwrap();
    let mut cfg = presets::ai_flow();
    cfg.routes.truncate(1);
    cfg.spawn = crate::config::model::SpawnPolicy::Interval { every_ms: 1.0e9 };
    let mut sim = sim_for(cfg, vp);
    let before = compile_frame(&sim, vp).ops.len();

    sim.spawn_on_route(0);
    let mut lit = false;
    for _ in 0..400 {
        if sim.step(16.0).arrived > 0 {
            lit = true;
            break;
        }
    }
    assert!(lit);
    let after = compile_frame(&sim, vp).ops.len();
    assert_eq!(after, before + HUB_RINGS);
}

#[test]
fn ops_carry_bounded_opacity() {
    let vp = Viewport::new(640.0, 360.0, 1.5).unwrap();
    let mut sim = sim_for(presets::mcp_ros2(), vp);
    for _ in 0..200 {
        sim.step(16.0);
    }
    for op in compile_frame(&sim, vp).ops {
        match op {
            DrawOp::FillPath { opacity, .. } | DrawOp::StrokePath { opacity, .. } => {
                assert!(opacity > 0.0 && opacity <= 1.0);
            }
            DrawOp::Clear { .. } => {}
        }
    }
}

fn fill_centers(plan: &FramePlan) -> Vec<Point> {
    use kurbo::Shape as _;
    plan.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillPath { path, .. } => Some(path.bounding_box().center()),
            _ => None,
        })
        .collect()
}

fn shifted_by(before: &[Point], after: &[Point], shift: Vec2) -> usize {
    before
        .iter()
        .zip(after)
        .filter(|(a, b)| ((**b - **a) - shift).hypot() < 1e-6)
        .count()
}

#[test]
fn pointer_shifts_layers_by_their_parallax_factor() {
    let vp = Viewport::new(800.0, 400.0, 1.0).unwrap();
    let mut sim = sim_for(presets::digital_twins(), vp);
    let centered = compile_frame(&sim, vp);

    sim.set_pointer(Some(Point::new(800.0, 400.0)));
    let moved = compile_frame(&sim, vp);
    assert_eq!(moved.ops.len(), centered.ops.len());

    // (800, 400) - center = (400, 200); strength 0.015 gives (6, 3) per unit factor.
    let before = fill_centers(&centered);
    let after = fill_centers(&moved);
    let field = shifted_by(&before, &after, Vec2::new(1.2, 0.6));
    let hub = shifted_by(&before, &after, Vec2::new(1.8, 0.9));
    let agents = shifted_by(&before, &after, Vec2::new(2.4, 1.2));
    assert!(field > 0 && field % 2 == 0, "field shifted {field}");
    assert_eq!(hub, 4);
    assert_eq!(agents, sim.agents().len());
    assert_eq!(field + hub + agents, before.len());
}

#[test]
fn pointer_at_center_or_absent_leaves_the_plan_unchanged() {
    let vp = Viewport::new(800.0, 400.0, 1.0).unwrap();
    let mut sim = sim_for(presets::digital_twins(), vp);
    let plain = compile_frame(&sim, vp);

    sim.set_pointer(Some(vp.center()));
    assert_eq!(compile_frame(&sim, vp), plain);

    sim.set_pointer(None);
    assert_eq!(compile_frame(&sim, vp), plain);
}

#[test]
fn configs_without_parallax_ignore_the_pointer() {
    let vp = Viewport::new(800.0, 400.0, 1.0).unwrap();
    let mut sim = sim_for(presets::ai_flow(), vp);
    let plain = compile_frame(&sim, vp);
    sim.set_pointer(Some(Point::new(10.0, 10.0)));
    assert_eq!(compile_frame(&sim, vp), plain);
}
