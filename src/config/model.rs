use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::color::Rgba8,
    foundation::core::{Point, Rect, Viewport},
    foundation::error::{PulseError, PulseResult},
};

/// Complete description of one animation surface variant.
///
/// A config is pure data: it can be loaded from JSON ([`SurfaceConfig::from_json`]), built with
/// [`crate::SurfaceConfigBuilder`], or taken from a named [`crate::preset`]. Positions and regions
/// are expressed as fractions of the measured viewport so one config fits any container size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceConfig {
    /// Variant name used in logs.
    pub name: String,
    /// Accessible description; becomes the static fallback's `aria-label`.
    pub description: String,
    /// Seed for node placement and spawning.
    #[serde(default)]
    pub seed: u64,
    /// Upper bound for the device pixel ratio used to size the backing buffer.
    #[serde(default = "default_max_dpr")]
    pub max_dpr: f64,
    /// Longest simulated step per frame; larger gaps (throttled tabs) are clamped to this.
    #[serde(default = "default_max_step_ms")]
    pub max_step_ms: f64,
    /// Linear glow decay window for hub and agents.
    #[serde(default = "default_glow_decay_ms")]
    pub glow_decay_ms: f64,
    /// Persistent pulsing node field.
    pub nodes: NodeFieldSpec,
    /// Optional central relay hub.
    #[serde(default)]
    pub hub: Option<HubSpec>,
    /// Decorative agents (robot icons).
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
    /// Particle routes (which sources feed which targets).
    #[serde(default)]
    pub routes: Vec<Route>,
    /// How often particles are emitted from the node field.
    pub spawn: SpawnPolicy,
    /// Progress gained per second by a flow particle.
    #[serde(default = "default_particle_speed")]
    pub particle_speed: f64,
    /// Easing applied to particle progress before interpolating along the path.
    #[serde(default)]
    pub ease: Ease,
    /// Hard cap on concurrently live flow particles.
    #[serde(default = "default_max_particles")]
    pub max_particles: usize,
    /// A particle past half its path that comes this close to its target counts as arrived.
    #[serde(default = "default_arrival_radius")]
    pub arrival_radius: f64,
    /// Optional ambient drifting motes.
    #[serde(default)]
    pub motes: Option<MoteSpec>,
    /// Optional pointer parallax; layers shift against the pointer's offset from center.
    #[serde(default)]
    pub parallax: Option<ParallaxSpec>,
    /// Colors.
    pub palette: Palette,
    /// Static fallback layout.
    #[serde(default)]
    pub fallback: FallbackSpec,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Rectangle in viewport fractions (`0..=1` on both axes).
pub struct Region {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Region {
    /// Create a region.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Resolve against a logical viewport size.
    pub fn to_rect(self, width: f64, height: f64) -> Rect {
        Rect::new(
            self.x * width,
            self.y * height,
            (self.x + self.width) * width,
            (self.y + self.height) * height,
        )
    }

    /// Resolve against a viewport.
    pub fn in_viewport(self, viewport: Viewport) -> Rect {
        self.to_rect(viewport.width, viewport.height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Node field layout and behaviour.
pub struct NodeFieldSpec {
    /// Number of nodes; constant for the lifetime of a running surface.
    pub count: usize,
    /// Placement region.
    pub region: Region,
    /// Radius range `[min, max]` in logical pixels.
    #[serde(default = "default_node_radius")]
    pub radius: [f64; 2],
    /// Base opacity range `[min, max]`.
    #[serde(default = "default_node_opacity")]
    pub opacity: [f64; 2],
    /// Pulse phase advance in radians per second.
    #[serde(default = "default_pulse_rate")]
    pub pulse_rate: f64,
    /// Nodes closer than this may be linked.
    #[serde(default = "default_link_distance")]
    pub link_distance: f64,
    /// Probability that a close pair is linked.
    #[serde(default = "default_link_probability")]
    pub link_probability: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Central relay hub.
pub struct HubSpec {
    /// Center in viewport fractions.
    pub at: Point,
    /// Core radius in logical pixels.
    #[serde(default = "default_hub_radius")]
    pub radius: f64,
    /// Optional label drawn under the hub in the static fallback.
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Icon drawn for a decorative agent.
pub enum AgentKind {
    /// Quad-rotor drone.
    Drone,
    /// Wheeled rover with antenna.
    Rover,
    /// Robotic arm.
    Arm,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One decorative agent.
pub struct AgentSpec {
    /// Icon kind.
    pub kind: AgentKind,
    /// Center in viewport fractions.
    pub at: Point,
    /// Optional label drawn in the static fallback.
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Endpoint of a route.
pub enum Anchor {
    /// A randomly picked node of the node field.
    Nodes,
    /// The hub.
    Hub,
    /// Agent by index into [`SurfaceConfig::agents`].
    Agent(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Path shape between route endpoints.
pub enum PathCurve {
    /// Straight segment.
    #[default]
    Linear,
    /// Quadratic Bézier; the control point sits `bend * chord length` off the chord midpoint,
    /// perpendicular to it (positive bends to the left of travel).
    Quadratic {
        /// Signed bend factor.
        bend: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Directed particle route.
pub struct Route {
    /// Source anchor.
    pub from: Anchor,
    /// Target anchor.
    pub to: Anchor,
    /// Path shape.
    #[serde(default)]
    pub curve: PathCurve,
    /// Particle color override (defaults to the palette particle color).
    #[serde(default)]
    pub color: Option<Rgba8>,
    /// Particle core radius in logical pixels.
    #[serde(default = "default_particle_size")]
    pub size: f64,
}

impl Route {
    /// Route with a linear path and default styling.
    pub fn new(from: Anchor, to: Anchor) -> Self {
        Self {
            from,
            to,
            curve: PathCurve::Linear,
            color: None,
            size: default_particle_size(),
        }
    }

    /// Same route with a different path shape.
    pub fn curved(mut self, curve: PathCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Same route with a color override.
    pub fn colored(mut self, color: Rgba8) -> Self {
        self.color = Some(color);
        self
    }

    /// Same route with a different particle size.
    pub fn sized(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Particle emission policy for routes leaving the node field.
pub enum SpawnPolicy {
    /// One wave every `every_ms` of simulated time.
    Interval {
        /// Interval between waves.
        every_ms: f64,
    },
    /// A wave with probability `per_frame` on every frame.
    Probability {
        /// Per-frame probability in `[0, 1]`.
        per_frame: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ambient motes: short-lived specks drifting around anchors.
pub struct MoteSpec {
    /// Anchors motes are emitted around; each emission picks one at random.
    pub anchors: Vec<Anchor>,
    /// Interval between emissions.
    #[serde(default = "default_mote_every_ms")]
    pub spawn_every_ms: f64,
    /// Hard cap; the oldest motes are discarded beyond it.
    #[serde(default = "default_mote_cap")]
    pub cap: usize,
    /// Placement jitter around the anchor in logical pixels.
    #[serde(default = "default_mote_jitter")]
    pub jitter: f64,
    /// Maximum drift speed per axis in logical pixels per second.
    #[serde(default = "default_mote_drift")]
    pub drift: f64,
    /// Extra vertical velocity range `[min, max]` (negative rises).
    #[serde(default)]
    pub rise: [f64; 2],
    /// Lifetime range `[min, max]` in milliseconds.
    #[serde(default = "default_mote_life_ms")]
    pub life_ms: [f64; 2],
    /// Size range `[min, max]` in logical pixels.
    #[serde(default = "default_mote_size")]
    pub size: [f64; 2],
}

/// Pointer parallax.
///
/// A layer drawn with factor `k` is translated by `(pointer - center) * strength * k` logical
/// pixels. Layers with factor `0` stay put.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxSpec {
    /// Pixels of shift per pixel of pointer offset, before the layer factor.
    #[serde(default = "default_parallax_strength")]
    pub strength: f64,
    /// Ambient motes.
    #[serde(default = "default_parallax_ambient")]
    pub ambient: f64,
    /// Node field and its links.
    #[serde(default)]
    pub field: f64,
    /// Route guides and flow particles.
    #[serde(default)]
    pub flow: f64,
    /// Relay hub.
    #[serde(default)]
    pub hub: f64,
    /// Robot agents.
    #[serde(default)]
    pub agents: f64,
}

impl Default for ParallaxSpec {
    fn default() -> Self {
        Self {
            strength: default_parallax_strength(),
            ambient: default_parallax_ambient(),
            field: 0.0,
            flow: 0.0,
            hub: 0.0,
            agents: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Palette shared by the animated and static renditions.
pub struct Palette {
    /// Optional background fill; transparent when absent.
    #[serde(default)]
    pub background: Option<Rgba8>,
    /// Optional background grid stroke color.
    #[serde(default)]
    pub grid: Option<Rgba8>,
    /// Node color.
    pub node: Rgba8,
    /// Node link color.
    pub link: Rgba8,
    /// Hub color.
    pub hub: Rgba8,
    /// Hub eye/iris accent.
    #[serde(default = "default_accent")]
    pub accent: Rgba8,
    /// Agent icon color.
    pub agent: Rgba8,
    /// Default particle color.
    pub particle: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static fallback layout.
pub struct FallbackSpec {
    /// SVG view box size `[width, height]`.
    #[serde(default = "default_view_box")]
    pub view_box: [f64; 2],
    /// Optional visible caption under the diagram.
    #[serde(default)]
    pub caption: Option<String>,
}

impl Default for FallbackSpec {
    fn default() -> Self {
        Self {
            view_box: default_view_box(),
            caption: None,
        }
    }
}

const MAX_NODES: usize = 512;
const MAX_PARTICLES: usize = 256;
const MAX_MOTES: usize = 512;

impl SurfaceConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> PulseResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| PulseError::serde(format!("parse surface config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> PulseResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read surface config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> PulseResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PulseError::serde(format!("serialize surface config: {e}")))
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> PulseResult<()> {
        if self.description.trim().is_empty() {
            return Err(PulseError::validation("description must be non-empty"));
        }
        positive("max_dpr", self.max_dpr)?;
        positive("max_step_ms", self.max_step_ms)?;
        non_negative("glow_decay_ms", self.glow_decay_ms)?;
        positive("particle_speed", self.particle_speed)?;
        non_negative("arrival_radius", self.arrival_radius)?;

        let n = &self.nodes;
        if n.count == 0 || n.count > MAX_NODES {
            return Err(PulseError::validation(format!(
                "nodes.count must be in 1..={MAX_NODES}"
            )));
        }
        validate_region("nodes.region", n.region)?;
        validate_range("nodes.radius", n.radius, false)?;
        validate_range("nodes.opacity", n.opacity, true)?;
        if n.opacity[1] > 1.0 {
            return Err(PulseError::validation("nodes.opacity must be <= 1"));
        }
        non_negative("nodes.pulse_rate", n.pulse_rate)?;
        non_negative("nodes.link_distance", n.link_distance)?;
        probability("nodes.link_probability", n.link_probability)?;

        if let Some(hub) = &self.hub {
            validate_point("hub.at", hub.at)?;
            positive("hub.radius", hub.radius)?;
        }
        for (i, a) in self.agents.iter().enumerate() {
            validate_point(&format!("agents[{i}].at"), a.at)?;
        }

        for (i, r) in self.routes.iter().enumerate() {
            self.validate_anchor(&format!("routes[{i}].from"), r.from)?;
            self.validate_anchor(&format!("routes[{i}].to"), r.to)?;
            if r.from == r.to && r.from != Anchor::Nodes {
                return Err(PulseError::validation(format!(
                    "routes[{i}] must connect two different anchors"
                )));
            }
            if let PathCurve::Quadratic { bend } = r.curve
                && !bend.is_finite()
            {
                return Err(PulseError::validation(format!(
                    "routes[{i}].curve.bend must be finite"
                )));
            }
            positive(&format!("routes[{i}].size"), r.size)?;
        }

        match self.spawn {
            SpawnPolicy::Interval { every_ms } => positive("spawn.every_ms", every_ms)?,
            SpawnPolicy::Probability { per_frame } => probability("spawn.per_frame", per_frame)?,
        }

        if self.max_particles == 0 || self.max_particles > MAX_PARTICLES {
            return Err(PulseError::validation(format!(
                "max_particles must be in 1..={MAX_PARTICLES}"
            )));
        }

        if let Some(m) = &self.motes {
            if m.anchors.is_empty() {
                return Err(PulseError::validation("motes.anchors must be non-empty"));
            }
            for (i, &a) in m.anchors.iter().enumerate() {
                self.validate_anchor(&format!("motes.anchors[{i}]"), a)?;
            }
            positive("motes.spawn_every_ms", m.spawn_every_ms)?;
            if m.cap == 0 || m.cap > MAX_MOTES {
                return Err(PulseError::validation(format!(
                    "motes.cap must be in 1..={MAX_MOTES}"
                )));
            }
            non_negative("motes.jitter", m.jitter)?;
            non_negative("motes.drift", m.drift)?;
            for v in m.rise {
                if !v.is_finite() {
                    return Err(PulseError::validation("motes.rise must be finite"));
                }
            }
            if m.rise[0] > m.rise[1] {
                return Err(PulseError::validation("motes.rise must be [min, max]"));
            }
            validate_range("motes.life_ms", m.life_ms, false)?;
            validate_range("motes.size", m.size, false)?;
        }

        if let Some(p) = &self.parallax {
            non_negative("parallax.strength", p.strength)?;
            for (field, v) in [
                ("parallax.ambient", p.ambient),
                ("parallax.field", p.field),
                ("parallax.flow", p.flow),
                ("parallax.hub", p.hub),
                ("parallax.agents", p.agents),
            ] {
                if !v.is_finite() {
                    return Err(PulseError::validation(format!("{field} must be finite")));
                }
            }
        }

        let [w, h] = self.fallback.view_box;
        positive("fallback.view_box width", w)?;
        positive("fallback.view_box height", h)?;

        Ok(())
    }

    fn validate_anchor(&self, field: &str, anchor: Anchor) -> PulseResult<()> {
        match anchor {
            Anchor::Nodes => Ok(()),
            Anchor::Hub if self.hub.is_some() => Ok(()),
            Anchor::Hub => Err(PulseError::validation(format!(
                "{field} references the hub but no hub is configured"
            ))),
            Anchor::Agent(i) if i < self.agents.len() => Ok(()),
            Anchor::Agent(i) => Err(PulseError::validation(format!(
                "{field} references missing agent {i}"
            ))),
        }
    }

    /// Whether any route emits from the node field (otherwise the loop only pulses nodes).
    pub fn has_source_routes(&self) -> bool {
        self.routes.iter().any(|r| r.from == Anchor::Nodes)
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        crate::config::presets::ai_flow()
    }
}

fn positive(field: &str, v: f64) -> PulseResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(PulseError::validation(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

fn non_negative(field: &str, v: f64) -> PulseResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(PulseError::validation(format!(
            "{field} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn probability(field: &str, v: f64) -> PulseResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(PulseError::validation(format!("{field} must be in [0, 1]")));
    }
    Ok(())
}

fn validate_range(field: &str, [lo, hi]: [f64; 2], allow_zero: bool) -> PulseResult<()> {
    if allow_zero {
        non_negative(field, lo)?;
    } else {
        positive(field, lo)?;
    }
    if !hi.is_finite() || hi < lo {
        return Err(PulseError::validation(format!(
            "{field} must be [min, max] with min <= max"
        )));
    }
    Ok(())
}

fn validate_region(field: &str, r: Region) -> PulseResult<()> {
    for v in [r.x, r.y, r.width, r.height] {
        if !v.is_finite() {
            return Err(PulseError::validation(format!("{field} must be finite")));
        }
    }
    if r.width <= 0.0 || r.height <= 0.0 {
        return Err(PulseError::validation(format!(
            "{field} must have positive width/height"
        )));
    }
    if r.x < 0.0 || r.y < 0.0 || r.x + r.width > 1.0 + 1e-9 || r.y + r.height > 1.0 + 1e-9 {
        return Err(PulseError::validation(format!(
            "{field} must lie within the unit square"
        )));
    }
    Ok(())
}

fn validate_point(field: &str, p: Point) -> PulseResult<()> {
    if !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y) {
        return Err(PulseError::validation(format!(
            "{field} must lie within the unit square"
        )));
    }
    Ok(())
}

fn default_max_dpr() -> f64 {
    2.0
}

fn default_max_step_ms() -> f64 {
    100.0
}

fn default_glow_decay_ms() -> f64 {
    2000.0
}

fn default_particle_speed() -> f64 {
    0.48
}

fn default_max_particles() -> usize {
    24
}

fn default_arrival_radius() -> f64 {
    20.0
}

fn default_node_radius() -> [f64; 2] {
    [2.0, 5.0]
}

fn default_node_opacity() -> [f64; 2] {
    [0.3, 0.7]
}

fn default_pulse_rate() -> f64 {
    3.0
}

fn default_link_distance() -> f64 {
    80.0
}

fn default_link_probability() -> f64 {
    0.3
}

fn default_hub_radius() -> f64 {
    20.0
}

pub(crate) fn default_particle_size() -> f64 {
    3.0
}

fn default_mote_every_ms() -> f64 {
    120.0
}

fn default_mote_cap() -> usize {
    40
}

fn default_mote_jitter() -> f64 {
    7.5
}

fn default_mote_drift() -> f64 {
    12.0
}

fn default_mote_life_ms() -> [f64; 2] {
    [830.0, 1670.0]
}

fn default_mote_size() -> [f64; 2] {
    [1.0, 2.5]
}

fn default_parallax_strength() -> f64 {
    0.015
}

fn default_parallax_ambient() -> f64 {
    1.0
}

fn default_accent() -> Rgba8 {
    Rgba8::rgb(255, 255, 255)
}

fn default_view_box() -> [f64; 2] {
    [800.0, 400.0]
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
