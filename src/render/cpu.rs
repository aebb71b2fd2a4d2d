use crate::{
    foundation::color::Rgba8,
    foundation::core::{Affine, BezPath, Point},
    foundation::error::PulseResult,
    render::backend::{FrameRGBA, RenderBackend, checked_dims},
    render::plan::{DrawOp, FramePlan},
};

/// CPU raster backend powered by `vello_cpu`.
///
/// Keeps one backing pixmap and reallocates it only when the plan size changes (resize).
pub struct CpuBackend {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    /// Backend with a `width` x `height` device-pixel buffer.
    pub fn new(width: u32, height: u32) -> PulseResult<Self> {
        let (w, h) = checked_dims(width, height)?;
        Ok(Self {
            width: w,
            height: h,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Current buffer size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn ensure_size(&mut self, width: u32, height: u32) -> PulseResult<()> {
        let (w, h) = checked_dims(width, height)?;
        if w != self.width || h != self.height {
            tracing::debug!(width = w, height = h, "resize cpu pixmap");
            self.width = w;
            self.height = h;
            self.pixmap = vello_cpu::Pixmap::new(w, h);
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(&mut self, plan: &FramePlan) -> PulseResult<FrameRGBA> {
        self.ensure_size(plan.width, plan.height)?;
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(affine_to_cpu(plan.transform));
        for op in &plan.ops {
            match op {
                DrawOp::Clear { color } => {
                    if color.a == 0 {
                        continue;
                    }
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    ctx.set_paint(paint(*color, 1.0));
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(self.width),
                        f64::from(self.height),
                    ));
                    ctx.set_transform(affine_to_cpu(plan.transform));
                }
                DrawOp::FillPath {
                    path,
                    color,
                    opacity,
                } => {
                    ctx.set_paint(paint(*color, *opacity));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                DrawOp::StrokePath {
                    path,
                    color,
                    width,
                    opacity,
                } => {
                    ctx.set_stroke(
                        vello_cpu::kurbo::Stroke::new(*width)
                            .with_caps(vello_cpu::kurbo::Cap::Round),
                    );
                    ctx.set_paint(paint(*color, *opacity));
                    ctx.stroke_path(&bezpath_to_cpu(path));
                }
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn name(&self) -> &'static str {
        "cpu"
    }
}

fn paint(color: Rgba8, opacity: f64) -> vello_cpu::peniko::Color {
    let c = color.with_opacity(opacity);
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
