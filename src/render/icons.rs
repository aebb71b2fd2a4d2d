//! Robot icon outlines in a unit box centered on the origin (`-1..=1` on both axes).
//!
//! The raster path scales these by the agent radius; the static fallback emits them as SVG path
//! data, so both renditions draw the same silhouettes.

use kurbo::{Circle, RoundedRect, Shape};

use crate::{
    config::model::AgentKind,
    foundation::core::{Affine, BezPath, Rect},
};

const TOLERANCE: f64 = 0.01;

/// Filled silhouette for `kind`.
pub(crate) fn icon_path(kind: AgentKind) -> BezPath {
    match kind {
        AgentKind::Drone => drone(),
        AgentKind::Rover => rover(),
        AgentKind::Arm => arm(),
    }
}

/// SVG path data for `kind` in unit coordinates.
pub(crate) fn icon_svg(kind: AgentKind) -> String {
    icon_path(kind).to_svg()
}

fn push(path: &mut BezPath, shape: impl Shape) {
    path.extend(shape.path_elements(TOLERANCE));
}

fn drone() -> BezPath {
    let mut p = BezPath::new();
    push(&mut p, RoundedRect::new(-0.3, -0.2, 0.3, 0.2, 0.08));
    for angle in [45.0_f64, 135.0, 225.0, 315.0] {
        let rad = angle.to_radians();
        let arm = Affine::rotate(rad) * Rect::new(0.0, -0.05, 0.7, 0.05).to_path(TOLERANCE);
        p.extend(arm);
        let hub = Affine::rotate(rad) * kurbo::Point::new(0.7, 0.0);
        push(&mut p, Circle::new(hub, 0.25));
    }
    p
}

fn rover() -> BezPath {
    let mut p = BezPath::new();
    push(&mut p, RoundedRect::new(-0.8, -0.2, 0.8, 0.35, 0.1));
    push(&mut p, Circle::new((-0.5, 0.55), 0.25));
    push(&mut p, Circle::new((0.5, 0.55), 0.25));
    push(&mut p, Rect::new(0.3, -0.75, 0.38, -0.2));
    push(&mut p, Circle::new((0.34, -0.8), 0.1));
    p
}

fn arm() -> BezPath {
    let mut p = BezPath::new();
    push(&mut p, RoundedRect::new(-0.6, 0.7, 0.6, 0.95, 0.05));
    push(&mut p, Circle::new((0.0, 0.6), 0.18));
    let lower = Affine::translate((0.0, 0.6)) * Affine::rotate(-1.2);
    p.extend(lower * Rect::new(0.0, -0.08, 0.85, 0.08).to_path(TOLERANCE));
    let elbow = lower * kurbo::Point::new(0.85, 0.0);
    push(&mut p, Circle::new(elbow, 0.14));
    let upper = Affine::translate(elbow.to_vec2()) * Affine::rotate(0.6);
    p.extend(upper * Rect::new(0.0, -0.07, 0.6, 0.07).to_path(TOLERANCE));
    let wrist = upper * kurbo::Point::new(0.6, 0.0);
    push(&mut p, Rect::new(wrist.x - 0.05, wrist.y - 0.2, wrist.x + 0.12, wrist.y - 0.05));
    push(&mut p, Rect::new(wrist.x - 0.05, wrist.y + 0.05, wrist.x + 0.12, wrist.y + 0.2));
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/icons.rs"]
mod tests;
