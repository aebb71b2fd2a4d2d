/// Transient brightness spike that decays linearly back to zero.
///
/// `trigger` sets the intensity to its maximum (1.0); it then falls linearly to 0 over
/// `decay_ms`. Once it has reached 0 the pulse settles and stops tracking its activation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowPulse {
    activated_at_ms: Option<f64>,
    decay_ms: f64,
}

impl GlowPulse {
    /// Create an idle pulse. Non-finite or negative durations are treated as instant decay.
    pub fn new(decay_ms: f64) -> Self {
        let decay_ms = if decay_ms.is_finite() && decay_ms > 0.0 {
            decay_ms
        } else {
            0.0
        };
        Self {
            activated_at_ms: None,
            decay_ms,
        }
    }

    /// Spike to full intensity at `now_ms`.
    pub fn trigger(&mut self, now_ms: f64) {
        self.activated_at_ms = Some(now_ms);
    }

    /// Intensity in `[0, 1]` at `now_ms`.
    pub fn intensity(&self, now_ms: f64) -> f64 {
        let Some(t0) = self.activated_at_ms else {
            return 0.0;
        };
        let dt = now_ms - t0;
        if !dt.is_finite() {
            return 0.0;
        }
        if dt <= 0.0 {
            return 1.0;
        }
        if self.decay_ms == 0.0 {
            return 0.0;
        }
        (1.0 - dt / self.decay_ms).clamp(0.0, 1.0)
    }

    /// Return `true` while the pulse is still tracking an activation.
    pub fn is_active(&self) -> bool {
        self.activated_at_ms.is_some()
    }

    /// Drop the activation once the intensity has reached zero.
    pub fn settle(&mut self, now_ms: f64) {
        if self.activated_at_ms.is_some() && self.intensity(now_ms) == 0.0 {
            self.activated_at_ms = None;
        }
    }

    /// Configured decay window.
    pub fn decay_ms(&self) -> f64 {
        self.decay_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/glow.rs"]
mod tests;
