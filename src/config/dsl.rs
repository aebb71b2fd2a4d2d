use crate::{
    animation::ease::Ease,
    config::model::{
        AgentKind, AgentSpec, Anchor, FallbackSpec, HubSpec, MoteSpec, NodeFieldSpec, Palette,
        ParallaxSpec, Route, SpawnPolicy, SurfaceConfig,
    },
    foundation::core::Point,
    foundation::error::PulseResult,
};

/// Fluent builder for [`SurfaceConfig`].
///
/// Starts from the defaults of the `ai-flow` variant with no hub, agents or routes; `build`
/// validates the result.
pub struct SurfaceConfigBuilder {
    cfg: SurfaceConfig,
}

impl SurfaceConfigBuilder {
    /// Start a config with the given name, accessible description and node field.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        nodes: NodeFieldSpec,
    ) -> Self {
        let base = SurfaceConfig::default();
        Self {
            cfg: SurfaceConfig {
                name: name.into(),
                description: description.into(),
                nodes,
                hub: None,
                agents: Vec::new(),
                routes: Vec::new(),
                motes: None,
                parallax: None,
                ..base
            },
        }
    }

    /// Continue from an existing config (for example a preset).
    pub fn from_config(cfg: SurfaceConfig) -> Self {
        Self { cfg }
    }

    /// Placement and spawn seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.cfg.seed = seed;
        self
    }

    /// Device pixel ratio cap.
    pub fn max_dpr(mut self, max_dpr: f64) -> Self {
        self.cfg.max_dpr = max_dpr;
        self
    }

    /// Longest simulated step per frame.
    pub fn max_step_ms(mut self, ms: f64) -> Self {
        self.cfg.max_step_ms = ms;
        self
    }

    /// Glow decay window.
    pub fn glow_decay_ms(mut self, ms: f64) -> Self {
        self.cfg.glow_decay_ms = ms;
        self
    }

    /// Central hub at `at` (viewport fractions).
    pub fn hub(mut self, at: Point, radius: f64) -> Self {
        self.cfg.hub = Some(HubSpec {
            at,
            radius,
            label: None,
        });
        self
    }

    /// Append an agent and return the builder; its index is the number of agents added before it.
    pub fn agent(mut self, kind: AgentKind, at: Point) -> Self {
        self.cfg.agents.push(AgentSpec {
            kind,
            at,
            label: None,
        });
        self
    }

    /// Append a route.
    pub fn route(mut self, route: Route) -> Self {
        self.cfg.routes.push(route);
        self
    }

    /// Shorthand for the common topology: nodes feed the hub, which relays to every agent.
    pub fn relay_through_hub(mut self) -> Self {
        self.cfg.routes.push(Route::new(Anchor::Nodes, Anchor::Hub));
        for i in 0..self.cfg.agents.len() {
            self.cfg.routes.push(Route::new(Anchor::Hub, Anchor::Agent(i)));
        }
        self
    }

    /// Emission policy.
    pub fn spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.cfg.spawn = spawn;
        self
    }

    /// Particle speed (progress per second) and easing.
    pub fn particles(mut self, speed: f64, ease: Ease) -> Self {
        self.cfg.particle_speed = speed;
        self.cfg.ease = ease;
        self
    }

    /// Live particle cap.
    pub fn max_particles(mut self, cap: usize) -> Self {
        self.cfg.max_particles = cap;
        self
    }

    /// Ambient motes.
    pub fn motes(mut self, motes: MoteSpec) -> Self {
        self.cfg.motes = Some(motes);
        self
    }

    /// Pointer parallax.
    pub fn parallax(mut self, parallax: ParallaxSpec) -> Self {
        self.cfg.parallax = Some(parallax);
        self
    }

    /// Colors.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.cfg.palette = palette;
        self
    }

    /// Static fallback layout.
    pub fn fallback(mut self, fallback: FallbackSpec) -> Self {
        self.cfg.fallback = fallback;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> PulseResult<SurfaceConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/dsl.rs"]
mod tests;
