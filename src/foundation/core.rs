use crate::foundation::error::{PulseError, PulseResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Measured drawable area of a mount target.
///
/// `width`/`height` are logical (CSS-like) pixels; `dpr` is the device pixel ratio used to size
/// the backing pixel buffer. Simulation and draw ops always work in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Device pixel ratio (backing pixels per logical pixel).
    pub dpr: f64,
}

impl Viewport {
    /// Create a validated viewport.
    pub fn new(width: f64, height: f64, dpr: f64) -> PulseResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(PulseError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(PulseError::validation("viewport dpr must be finite and > 0"));
        }
        Ok(Self { width, height, dpr })
    }

    /// Interpret a raw layout measurement.
    ///
    /// Returns `None` while the measured box is empty (layout not committed yet). A missing or
    /// non-finite pixel ratio falls back to `1.0`; the ratio is capped at `max_dpr`.
    pub fn measured(width: f64, height: f64, dpr: f64, max_dpr: f64) -> Option<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let cap = if max_dpr.is_finite() && max_dpr > 0.0 {
            max_dpr
        } else {
            1.0
        };
        Some(Self {
            width,
            height,
            dpr: dpr.min(cap),
        })
    }

    /// Backing buffer width in device pixels.
    pub fn pixel_width(self) -> u32 {
        (self.width * self.dpr).round().max(1.0) as u32
    }

    /// Backing buffer height in device pixels.
    pub fn pixel_height(self) -> u32 {
        (self.height * self.dpr).round().max(1.0) as u32
    }

    /// Transform mapping logical coordinates to device pixels.
    pub fn to_device(self) -> Affine {
        Affine::scale(self.dpr)
    }

    /// Logical center point.
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Logical bounds.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Small deterministic generator (SplitMix64) used for entity placement and spawning.
///
/// Seeded from the surface config so a given config produces the same scene on every mount.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    pub fn next_f64_01(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64_01()
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_f64_01() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
