use crate::{
    foundation::color::Rgba8,
    foundation::core::{Point, Vec2},
};

/// Short-lived ambient speck drifting near an anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mote {
    /// Center in logical pixels.
    pub pos: Point,
    /// Velocity in logical pixels per second.
    pub vel: Vec2,
    /// Remaining life in `(0, 1]`.
    pub life: f64,
    /// Total lifetime in milliseconds.
    pub life_span_ms: f64,
    /// Radius.
    pub size: f64,
    /// Fill color; alpha is modulated by `life` when drawn.
    pub color: Rgba8,
}

impl Mote {
    /// Drift for `dt_ms` and burn life; returns `false` once expired.
    pub(crate) fn advance(&mut self, dt_ms: f64) -> bool {
        self.pos += self.vel * (dt_ms / 1000.0);
        self.life -= dt_ms / self.life_span_ms;
        self.life > 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/mote.rs"]
mod tests;
