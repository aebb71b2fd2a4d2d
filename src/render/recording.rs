use crate::{
    foundation::error::PulseResult,
    render::backend::{FrameRGBA, RenderBackend},
    render::plan::FramePlan,
};

/// Backend that keeps the last plan instead of rasterizing it.
///
/// `render_plan` returns an empty 0x0 frame; inspect the work through
/// [`RenderBackend::last_plan`] and [`RecordingBackend::frames`].
#[derive(Debug, Default)]
pub struct RecordingBackend {
    last: Option<FramePlan>,
    frames: usize,
}

impl RecordingBackend {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl RenderBackend for RecordingBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> PulseResult<FrameRGBA> {
        self.last = Some(plan.clone());
        self.frames += 1;
        Ok(FrameRGBA {
            width: 0,
            height: 0,
            data: Vec::new(),
            premultiplied: true,
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }

    fn last_plan(&self) -> Option<&FramePlan> {
        self.last.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
