use crate::{
    animation::glow::GlowPulse,
    config::model::AgentKind,
    foundation::core::Point,
};

/// Icon radius for robot agents in logical pixels.
pub(crate) const AGENT_RADIUS: f64 = 18.0;

const GLOW_SCALE: f64 = 0.2;

/// Decorative agent (the hub or a robot icon) that glows when a particle arrives.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    /// Icon kind; `None` for the hub.
    pub kind: Option<AgentKind>,
    /// Center in logical pixels.
    pub pos: Point,
    /// Base radius in logical pixels.
    pub radius: f64,
    /// Glow intensity sampled at the last step.
    pub glow: f64,
    /// Draw scale sampled at the last step (`1 + 0.2 * glow`).
    pub scale: f64,
    pub(crate) anchor: Point,
    pulse: GlowPulse,
}

impl Agent {
    pub(crate) fn new(kind: Option<AgentKind>, anchor: Point, radius: f64, decay_ms: f64) -> Self {
        Self {
            kind,
            pos: Point::ZERO,
            radius,
            glow: 0.0,
            scale: 1.0,
            anchor,
            pulse: GlowPulse::new(decay_ms),
        }
    }

    /// Whether this agent is the relay hub.
    pub fn is_hub(&self) -> bool {
        self.kind.is_none()
    }

    /// Glow intensity at an arbitrary simulated time.
    pub fn glow_at(&self, now_ms: f64) -> f64 {
        self.pulse.intensity(now_ms)
    }

    pub(crate) fn activate(&mut self, now_ms: f64) {
        self.pulse.trigger(now_ms);
        self.sample(now_ms);
    }

    pub(crate) fn sample(&mut self, now_ms: f64) {
        self.glow = self.pulse.intensity(now_ms);
        self.scale = 1.0 + GLOW_SCALE * self.glow;
        self.pulse.settle(now_ms);
    }

    /// Place at the anchor fraction of a `width` x `height` viewport.
    pub(crate) fn place(&mut self, width: f64, height: f64) {
        self.pos = Point::new(self.anchor.x * width, self.anchor.y * height);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/agent.rs"]
mod tests;
