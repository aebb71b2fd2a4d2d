use crate::{
    foundation::core::Viewport,
    foundation::error::{PulseError, PulseResult},
    render::plan::FramePlan,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Straight-alpha copy of the pixel data (what PNG encoders expect).
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// A renderer that executes a compiled [`FramePlan`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Draw `plan` and read back the frame.
    fn render_plan(&mut self, plan: &FramePlan) -> PulseResult<FrameRGBA>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Most recent plan, for backends that keep it.
    fn last_plan(&self) -> Option<&FramePlan> {
        None
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
    /// Keeps the last plan instead of rasterizing (headless hosts and tests).
    Recording,
}

/// Create a rendering backend sized for `viewport`.
///
/// Fails when the backing buffer cannot be allocated for this viewport (for example it exceeds
/// the raster size limit).
pub fn create_backend(kind: BackendKind, viewport: Viewport) -> PulseResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            viewport.pixel_width(),
            viewport.pixel_height(),
        )?)),
        BackendKind::Recording => Ok(Box::new(crate::render::recording::RecordingBackend::new())),
    }
}

pub(crate) fn checked_dims(width: u32, height: u32) -> PulseResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PulseError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PulseError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PulseError::render("surface must be at least 1x1"));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
