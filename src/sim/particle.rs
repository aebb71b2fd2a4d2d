use kurbo::{Line, ParamCurve, QuadBez};

use crate::{
    animation::ease::Ease,
    config::model::{Anchor, PathCurve},
    foundation::color::Rgba8,
    foundation::core::{Affine, BezPath, Point, Vec2},
};

/// Geometry a flow particle travels along, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticlePath {
    /// Straight segment.
    Linear(Line),
    /// Quadratic Bézier.
    Quadratic(QuadBez),
}

impl ParticlePath {
    /// Build the path between two points for a route's curve setting.
    ///
    /// Quadratic control points sit `bend * |end - start|` off the chord midpoint, along the
    /// chord's left normal. Coincident endpoints collapse to a point.
    pub fn between(start: Point, end: Point, curve: PathCurve) -> Self {
        match curve {
            _ if start == end => Self::Linear(Line::new(start, end)),
            PathCurve::Linear => Self::Linear(Line::new(start, end)),
            PathCurve::Quadratic { bend } => {
                let chord = end - start;
                let normal = Vec2::new(chord.y, -chord.x);
                let ctrl = start.midpoint(end) + normal * bend;
                Self::Quadratic(QuadBez::new(start, ctrl, end))
            }
        }
    }

    /// Start point.
    pub fn start(&self) -> Point {
        match self {
            Self::Linear(l) => l.p0,
            Self::Quadratic(q) => q.p0,
        }
    }

    /// End point.
    pub fn end(&self) -> Point {
        match self {
            Self::Linear(l) => l.p1,
            Self::Quadratic(q) => q.p2,
        }
    }

    /// Point at parameter `t`, clamped to `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear(l) => l.eval(t),
            Self::Quadratic(q) => q.eval(t),
        }
    }

    /// Path as a stroke-able Bézier path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut p = BezPath::new();
        p.move_to(self.start());
        match self {
            Self::Linear(l) => p.line_to(l.p1),
            Self::Quadratic(q) => p.quad_to(q.p1, q.p2),
        }
        p
    }

    /// Same path under an affine map.
    pub fn transformed(&self, xf: Affine) -> Self {
        match self {
            Self::Linear(l) => Self::Linear(Line::new(xf * l.p0, xf * l.p1)),
            Self::Quadratic(q) => Self::Quadratic(QuadBez::new(xf * q.p0, xf * q.p1, xf * q.p2)),
        }
    }
}

/// Transient particle travelling along one route.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowParticle {
    /// Path in logical pixels, fixed at spawn time.
    pub path: ParticlePath,
    /// Raw progress in `[0, 1]`.
    pub progress: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Core radius.
    pub size: f64,
    /// Index of the route that emitted it.
    pub route: usize,
    /// Where it is heading.
    pub target: Anchor,
}

impl FlowParticle {
    /// Position after applying `ease` to the raw progress.
    pub fn position(&self, ease: Ease) -> Point {
        self.path.eval(ease.apply(self.progress))
    }

    /// Advance by `delta` progress, saturating at 1.
    pub(crate) fn advance(&mut self, delta: f64) {
        if delta.is_finite() && delta > 0.0 {
            self.progress = (self.progress + delta).min(1.0);
        }
    }

    /// Whether the particle has reached its target this frame.
    ///
    /// Completed progress always arrives; past the halfway mark, coming within `radius` of the
    /// end point also counts.
    pub fn has_arrived(&self, ease: Ease, radius: f64) -> bool {
        self.progress >= 1.0
            || (self.progress > 0.5 && self.position(ease).distance(self.path.end()) < radius)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/particle.rs"]
mod tests;
