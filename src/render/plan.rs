use kurbo::{Circle, Line, Shape as _};

use crate::{
    config::model::{Anchor, SurfaceConfig},
    foundation::color::Rgba8,
    foundation::core::{Affine, BezPath, Point, Vec2, Viewport},
    render::icons::icon_path,
    sim::agent::Agent,
    sim::particle::ParticlePath,
    sim::world::Simulation,
};

const TOLERANCE: f64 = 0.1;
const GRID_SPACING: f64 = 50.0;
const HUB_RINGS: usize = 3;

/// One backend-agnostic draw operation in logical pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Replace every pixel with `color`.
    Clear {
        /// Straight-alpha clear color.
        color: Rgba8,
    },
    /// Fill a path (non-zero winding).
    FillPath {
        /// Geometry.
        path: BezPath,
        /// Paint.
        color: Rgba8,
        /// Extra opacity in `[0, 1]`.
        opacity: f64,
    },
    /// Stroke a path with round caps.
    StrokePath {
        /// Geometry.
        path: BezPath,
        /// Paint.
        color: Rgba8,
        /// Stroke width in logical pixels.
        width: f64,
        /// Extra opacity in `[0, 1]`.
        opacity: f64,
    },
}

/// Draw ops for one frame plus the target buffer geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Backing buffer width in device pixels.
    pub width: u32,
    /// Backing buffer height in device pixels.
    pub height: u32,
    /// Logical to device transform applied to every op.
    pub transform: Affine,
    /// Ops in painter's order.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    fn fill(&mut self, path: BezPath, color: Rgba8, opacity: f64) {
        if opacity > 0.0 && color.a > 0 {
            self.ops.push(DrawOp::FillPath {
                path,
                color,
                opacity: opacity.min(1.0),
            });
        }
    }

    fn stroke(&mut self, path: BezPath, color: Rgba8, width: f64, opacity: f64) {
        if opacity > 0.0 && color.a > 0 {
            self.ops.push(DrawOp::StrokePath {
                path,
                color,
                width,
                opacity: opacity.min(1.0),
            });
        }
    }

    fn circle(&mut self, center: Point, radius: f64, color: Rgba8, opacity: f64) {
        if radius > 0.0 {
            self.fill(Circle::new(center, radius).to_path(TOLERANCE), color, opacity);
        }
    }
}

/// Compile the current state of `sim` into a [`FramePlan`] sized for `viewport`.
///
/// Painter's order: background, grid, node links, route guides, nodes, motes, hub, agents,
/// particles. With parallax configured and a pointer recorded, every layer above the grid is
/// shifted by [`Simulation::parallax_offset`] for its layer factor.
pub fn compile_frame(sim: &Simulation, viewport: Viewport) -> FramePlan {
    let cfg = sim.config();
    let palette = &cfg.palette;
    let mut plan = FramePlan {
        width: viewport.pixel_width(),
        height: viewport.pixel_height(),
        transform: viewport.to_device(),
        ops: Vec::with_capacity(16 + sim.nodes().len() * 2 + sim.particles().len() * 2),
    };

    plan.ops.push(DrawOp::Clear {
        color: palette.background.unwrap_or(Rgba8::rgba(0, 0, 0, 0)),
    });

    if let Some(grid) = palette.grid {
        plan.stroke(grid_path(viewport), grid, 1.0, 1.0);
    }

    let (field, flow, ambient, hub_shift, agent_shift) = match cfg.parallax {
        Some(p) => (
            sim.parallax_offset(p.field),
            sim.parallax_offset(p.flow),
            sim.parallax_offset(p.ambient),
            sim.parallax_offset(p.hub),
            sim.parallax_offset(p.agents),
        ),
        None => Default::default(),
    };

    let nodes = sim.nodes();
    for &(i, j) in sim.links() {
        let (Some(a), Some(b)) = (nodes.get(i), nodes.get(j)) else {
            continue;
        };
        let alpha = 0.25 * a.alpha().min(b.alpha());
        plan.stroke(line_path(a.pos + field, b.pos + field), palette.link, 0.5, alpha);
    }

    route_guides(&mut plan, sim, cfg, flow);

    for n in nodes {
        let alpha = n.alpha();
        let at = n.pos + field;
        plan.circle(at, n.radius * 2.0, palette.node, alpha * 0.25);
        plan.circle(at, n.radius, palette.node, alpha);
    }

    for m in sim.motes() {
        plan.circle(m.pos + ambient, m.size, m.color, m.life.clamp(0.0, 1.0) * 0.8);
    }

    if let Some(hub) = sim.hub() {
        draw_hub(&mut plan, hub, cfg, hub_shift);
    }
    for agent in sim.agents() {
        draw_agent(&mut plan, agent, cfg, agent_shift);
    }

    let ease = cfg.ease;
    for p in sim.particles() {
        let at = p.position(ease) + flow;
        plan.circle(at, p.size * 2.5, p.color, 0.3);
        plan.circle(at, p.size, p.color, 1.0);
    }

    plan
}

fn line_path(a: Point, b: Point) -> BezPath {
    Line::new(a, b).to_path(TOLERANCE)
}

fn grid_path(viewport: Viewport) -> BezPath {
    let mut path = BezPath::new();
    let mut x = 0.0;
    while x <= viewport.width {
        path.move_to((x, 0.0));
        path.line_to((x, viewport.height));
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y <= viewport.height {
        path.move_to((0.0, y));
        path.line_to((viewport.width, y));
        y += GRID_SPACING;
    }
    path
}

fn route_guides(plan: &mut FramePlan, sim: &Simulation, cfg: &SurfaceConfig, shift: Vec2) {
    let fixed = |anchor: Anchor| match anchor {
        Anchor::Hub => sim.hub().map(|h| h.pos),
        Anchor::Agent(i) => sim.agents().get(i).map(|a| a.pos),
        Anchor::Nodes => None,
    };
    for route in &cfg.routes {
        let (Some(from), Some(to)) = (fixed(route.from), fixed(route.to)) else {
            continue;
        };
        let color = route.color.unwrap_or(cfg.palette.particle);
        let path = ParticlePath::between(from, to, route.curve);
        plan.stroke(
            Affine::translate(shift) * path.to_bez_path(),
            color,
            1.0,
            0.2,
        );
    }
}

fn draw_hub(plan: &mut FramePlan, hub: &Agent, cfg: &SurfaceConfig, shift: Vec2) {
    let palette = &cfg.palette;
    let at = hub.pos + shift;
    let r = hub.radius * hub.scale;
    if hub.glow > 0.0 {
        for k in 1..=HUB_RINGS {
            let ring = r * (1.0 + 0.5 * k as f64);
            plan.circle(at, ring, palette.hub, hub.glow * 0.3 / k as f64);
        }
    }
    plan.circle(at, r * 1.3, palette.hub, 0.2);
    plan.circle(at, r, palette.hub, 0.9);
    plan.circle(at, r * 0.45, palette.accent, 0.9);
    plan.circle(at, r * 0.2, palette.hub, 1.0);
}

fn draw_agent(plan: &mut FramePlan, agent: &Agent, cfg: &SurfaceConfig, shift: Vec2) {
    let Some(kind) = agent.kind else {
        return;
    };
    let palette = &cfg.palette;
    let r = agent.radius * agent.scale;
    let at = agent.pos + shift;
    if agent.glow > 0.0 {
        plan.circle(at, r * 1.6, palette.agent, agent.glow * 0.35);
    }
    let xf = Affine::translate(at.to_vec2()) * Affine::scale(r);
    plan.fill(xf * icon_path(kind), palette.agent, 0.9);
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
