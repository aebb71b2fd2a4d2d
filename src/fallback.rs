use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    config::model::{Anchor, SurfaceConfig},
    foundation::color::Rgba8,
    foundation::core::{Point, Rng64},
    foundation::error::{PulseError, PulseResult},
    render::backend::FrameRGBA,
    render::icons::icon_svg,
    sim::agent::AGENT_RADIUS,
    sim::node::seed_field,
    sim::particle::ParticlePath,
};

/// Static rendition shown instead of the animation under reduced motion.
///
/// An SVG document in the config's fallback view box carrying `role="img"` and an `aria-label`
/// equal to the config description. It draws the same seeded node field, the hub, route lines
/// with gradient strokes and the agent icons, frozen at rest.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticFallback {
    aria_label: String,
    view_box: [f64; 2],
    svg: String,
}

impl StaticFallback {
    /// Build the fallback document for `config`.
    pub fn build(config: &SurfaceConfig) -> PulseResult<Self> {
        let svg = write_svg(config)
            .map_err(|_| PulseError::render("format static fallback svg"))?;
        Ok(Self {
            aria_label: config.description.clone(),
            view_box: config.fallback.view_box,
            svg,
        })
    }

    /// Accessible description exposed by the document.
    pub fn aria_label(&self) -> &str {
        &self.aria_label
    }

    /// View box size `[width, height]`.
    pub fn view_box(&self) -> [f64; 2] {
        self.view_box
    }

    /// The SVG document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Parse the document with `usvg`.
    pub fn to_tree(&self) -> PulseResult<usvg::Tree> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        let opts = usvg::Options {
            fontdb: Arc::new(db),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(self.svg.as_bytes(), &opts)
            .context("parse static fallback svg")?;
        Ok(tree)
    }

    /// Rasterize into a premultiplied `width` x `height` frame, stretching the view box to fit.
    pub fn rasterize(&self, width: u32, height: u32) -> PulseResult<FrameRGBA> {
        let tree = self.to_tree()?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PulseError::render("failed to allocate fallback pixmap"))?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        Ok(FrameRGBA {
            width,
            height,
            data: pixmap.data().to_vec(),
            premultiplied: true,
        })
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn fill_attrs(color: Rgba8) -> String {
    if color.a == 255 {
        format!("fill=\"{}\"", color.to_hex_rgb())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{:.3}\"",
            color.to_hex_rgb(),
            color.opacity()
        )
    }
}

fn write_svg(cfg: &SurfaceConfig) -> Result<String, std::fmt::Error> {
    let [w, h] = cfg.fallback.view_box;
    let palette = &cfg.palette;
    let label = escape(&cfg.description);
    let mut s = String::with_capacity(8 * 1024);

    writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{label}">"#
    )?;
    writeln!(s, "  <title>{label}</title>")?;

    let hub = cfg.hub.as_ref().map(|hub| {
        (
            Point::new(hub.at.x * w, hub.at.y * h),
            hub.radius,
            hub.label.as_deref(),
        )
    });
    let agents: Vec<Point> = cfg
        .agents
        .iter()
        .map(|a| Point::new(a.at.x * w, a.at.y * h))
        .collect();
    let field = cfg.nodes.region.to_rect(w, h);
    let anchor = |a: Anchor| match a {
        Anchor::Nodes => Some(field.center()),
        Anchor::Hub => hub.map(|(p, _, _)| p),
        Anchor::Agent(i) => agents.get(i).copied(),
    };
    let anchor_color = |a: Anchor| match a {
        Anchor::Nodes => palette.node,
        Anchor::Hub => palette.hub,
        Anchor::Agent(_) => palette.agent,
    };

    writeln!(s, "  <defs>")?;
    for (i, route) in cfg.routes.iter().enumerate() {
        let (Some(from), Some(to)) = (anchor(route.from), anchor(route.to)) else {
            continue;
        };
        let start = route.color.unwrap_or(palette.particle);
        let end = anchor_color(route.to);
        writeln!(
            s,
            r#"    <linearGradient id="route-{i}" gradientUnits="userSpaceOnUse" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}">"#,
            from.x, from.y, to.x, to.y
        )?;
        writeln!(
            s,
            r#"      <stop offset="0" stop-color="{}" stop-opacity="0.8"/>"#,
            start.to_hex_rgb()
        )?;
        writeln!(
            s,
            r#"      <stop offset="1" stop-color="{}" stop-opacity="0.8"/>"#,
            end.to_hex_rgb()
        )?;
        writeln!(s, "    </linearGradient>")?;
    }
    writeln!(s, "  </defs>")?;

    if let Some(bg) = palette.background {
        writeln!(s, r#"  <rect width="{w}" height="{h}" {}/>"#, fill_attrs(bg))?;
    }

    if let Some(grid) = palette.grid {
        write!(
            s,
            r#"  <g stroke="{}" stroke-opacity="{:.3}" stroke-width="1">"#,
            grid.to_hex_rgb(),
            grid.opacity()
        )?;
        let mut x = 0.0;
        while x <= w {
            write!(s, r#"<line x1="{x}" y1="0" x2="{x}" y2="{h}"/>"#)?;
            x += 50.0;
        }
        let mut y = 0.0;
        while y <= h {
            write!(s, r#"<line x1="0" y1="{y}" x2="{w}" y2="{y}"/>"#)?;
            y += 50.0;
        }
        writeln!(s, "</g>")?;
    }

    let (nodes, links) = seed_field(&cfg.nodes, field, &mut Rng64::new(cfg.seed));
    writeln!(
        s,
        r#"  <g stroke="{}" stroke-opacity="0.2" stroke-width="0.5">"#,
        palette.link.to_hex_rgb()
    )?;
    for &(i, j) in &links {
        let (a, b) = (nodes[i].pos, nodes[j].pos);
        writeln!(
            s,
            r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            a.x, a.y, b.x, b.y
        )?;
    }
    writeln!(s, "  </g>")?;

    for (i, route) in cfg.routes.iter().enumerate() {
        let (Some(from), Some(to)) = (anchor(route.from), anchor(route.to)) else {
            continue;
        };
        let d = ParticlePath::between(from, to, route.curve)
            .to_bez_path()
            .to_svg();
        writeln!(
            s,
            r#"  <path d="{d}" fill="none" stroke="url(#route-{i})" stroke-width="2" stroke-linecap="round"/>"#
        )?;
    }

    writeln!(s, r#"  <g {}>"#, fill_attrs(palette.node))?;
    for n in &nodes {
        writeln!(
            s,
            r#"    <circle cx="{:.2}" cy="{:.2}" r="{:.2}" opacity="{:.3}"/>"#,
            n.pos.x, n.pos.y, n.radius, n.opacity
        )?;
    }
    writeln!(s, "  </g>")?;

    let text_fill = palette.accent.to_hex_rgb();
    if let Some((at, r, hub_label)) = hub {
        writeln!(
            s,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" {} opacity="0.2"/>"#,
            at.x,
            at.y,
            r * 1.3,
            fill_attrs(palette.hub)
        )?;
        writeln!(
            s,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" {} opacity="0.9"/>"#,
            at.x,
            at.y,
            r,
            fill_attrs(palette.hub)
        )?;
        writeln!(
            s,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
            at.x,
            at.y,
            r * 0.45,
            fill_attrs(palette.accent)
        )?;
        if let Some(text) = hub_label {
            write_label(&mut s, at, r, text, &text_fill)?;
        }
    }

    for (spec, &at) in cfg.agents.iter().zip(&agents) {
        writeln!(
            s,
            r#"  <path d="{}" transform="translate({:.2} {:.2}) scale({AGENT_RADIUS})" {}/>"#,
            icon_svg(spec.kind),
            at.x,
            at.y,
            fill_attrs(palette.agent)
        )?;
        if let Some(text) = spec.label.as_deref() {
            write_label(&mut s, at, AGENT_RADIUS, text, &text_fill)?;
        }
    }

    if let Some(caption) = cfg.fallback.caption.as_deref() {
        writeln!(
            s,
            r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="14" fill="{text_fill}" fill-opacity="0.8">{}</text>"#,
            w * 0.5,
            h - 16.0,
            escape(caption)
        )?;
    }

    writeln!(s, "</svg>")?;
    Ok(s)
}

fn write_label(
    s: &mut String,
    at: Point,
    radius: f64,
    text: &str,
    fill: &str,
) -> std::fmt::Result {
    writeln!(
        s,
        r#"  <text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="12" fill="{fill}" fill-opacity="0.8">{}</text>"#,
        at.x,
        at.y + radius + 16.0,
        escape(text)
    )
}

#[cfg(test)]
#[path = "../tests/unit/fallback.rs"]
mod tests;
