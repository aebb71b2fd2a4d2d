use std::f64::consts::TAU;

use crate::{
    config::model::NodeFieldSpec,
    foundation::core::{Point, Rect, Rng64},
};

/// One persistent node of the pulsing field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimNode {
    /// Center in logical pixels.
    pub pos: Point,
    /// Core radius.
    pub radius: f64,
    /// Base opacity.
    pub opacity: f64,
    /// Pulse phase in radians; only ever increases.
    pub phase: f64,
}

impl SimNode {
    /// Pulse brightness factor in `[0.2, 1.0]`.
    pub fn brightness(&self) -> f64 {
        0.6 + 0.4 * self.phase.sin()
    }

    /// Effective opacity for this frame.
    pub fn alpha(&self) -> f64 {
        (self.opacity * self.brightness()).clamp(0.0, 1.0)
    }

    pub(crate) fn advance(&mut self, pulse_rate: f64, dt_ms: f64) {
        self.phase += pulse_rate * dt_ms / 1000.0;
    }
}

/// Place `spec.count` nodes inside `area` and pick their links.
///
/// Pairs closer than `link_distance` are linked with probability `link_probability`. Links are
/// stored as `(i, j)` with `i < j`.
pub(crate) fn seed_field(
    spec: &NodeFieldSpec,
    area: Rect,
    rng: &mut Rng64,
) -> (Vec<SimNode>, Vec<(usize, usize)>) {
    let nodes: Vec<SimNode> = (0..spec.count)
        .map(|_| SimNode {
            pos: Point::new(rng.range(area.x0, area.x1), rng.range(area.y0, area.y1)),
            radius: rng.range(spec.radius[0], spec.radius[1]),
            opacity: rng.range(spec.opacity[0], spec.opacity[1]),
            phase: rng.range(0.0, TAU),
        })
        .collect();

    let mut links = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i].pos.distance(nodes[j].pos) < spec.link_distance
                && rng.next_f64_01() < spec.link_probability
            {
                links.push((i, j));
            }
        }
    }
    (nodes, links)
}

#[cfg(test)]
#[path = "../../tests/unit/sim/node.rs"]
mod tests;
