use std::collections::VecDeque;
use std::sync::Arc;

use crate::{
    config::model::{Anchor, SpawnPolicy, SurfaceConfig},
    foundation::color::Rgba8,
    foundation::core::{Point, Rng64, Vec2, Viewport},
    sim::agent::{AGENT_RADIUS, Agent},
    sim::mote::Mote,
    sim::node::{SimNode, seed_field},
    sim::particle::{FlowParticle, ParticlePath},
};

/// Counters for one simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particles created this step (node emissions plus hub fan-out).
    pub spawned: usize,
    /// Particles that reached their target and were removed.
    pub arrived: usize,
    /// Oldest particles discarded to stay under the cap.
    pub dropped: usize,
    /// Live particles after the step.
    pub particles: usize,
    /// Live motes after the step.
    pub motes: usize,
}

/// The simulated world behind one running surface.
///
/// Owns the node field, hub, agents, live particles and motes. Time only moves through
/// [`Simulation::step`]; every transient entity leaves the active set once it reaches its
/// terminal value, so live counts stay bounded by the config caps however long it runs.
#[derive(Clone, Debug)]
pub struct Simulation {
    config: Arc<SurfaceConfig>,
    viewport: Viewport,
    rng: Rng64,
    nodes: Vec<SimNode>,
    links: Vec<(usize, usize)>,
    hub: Option<Agent>,
    agents: Vec<Agent>,
    particles: VecDeque<FlowParticle>,
    motes: VecDeque<Mote>,
    elapsed_ms: f64,
    next_wave_ms: f64,
    next_mote_ms: f64,
    pointer: Option<Point>,
}

impl Simulation {
    /// Seed a fresh world for `viewport`. `config` is expected to have passed
    /// [`SurfaceConfig::validate`].
    pub fn new(config: Arc<SurfaceConfig>, viewport: Viewport) -> Self {
        let mut rng = Rng64::new(config.seed);
        let area = config.nodes.region.in_viewport(viewport);
        let (nodes, links) = seed_field(&config.nodes, area, &mut rng);

        let decay = config.glow_decay_ms;
        let hub = config
            .hub
            .as_ref()
            .map(|h| Agent::new(None, h.at, h.radius, decay));
        let agents = config
            .agents
            .iter()
            .map(|a| Agent::new(Some(a.kind), a.at, AGENT_RADIUS, decay))
            .collect();

        let next_wave_ms = match config.spawn {
            SpawnPolicy::Interval { every_ms } => every_ms,
            SpawnPolicy::Probability { .. } => 0.0,
        };

        let mut sim = Self {
            config,
            viewport,
            rng,
            nodes,
            links,
            hub,
            agents,
            particles: VecDeque::new(),
            motes: VecDeque::new(),
            elapsed_ms: 0.0,
            next_wave_ms,
            next_mote_ms: 0.0,
            pointer: None,
        };
        sim.place_agents();
        sim
    }

    /// Config the world was seeded from.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Viewport used for new spawns.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Simulated time since the world was seeded.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Persistent nodes.
    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Node links as index pairs.
    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    /// Relay hub, when configured.
    pub fn hub(&self) -> Option<&Agent> {
        self.hub.as_ref()
    }

    /// Robot agents in config order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> impl ExactSizeIterator<Item = &FlowParticle> + '_ {
        self.particles.iter()
    }

    /// Live motes, oldest first.
    pub fn motes(&self) -> impl ExactSizeIterator<Item = &Mote> + '_ {
        self.motes.iter()
    }

    /// Adopt a new viewport.
    ///
    /// Hub and agents are re-anchored; nodes, live particles and motes keep their current
    /// coordinates and progress.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.place_agents();
    }

    /// Last pointer position over the surface, in logical pixels.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Record the pointer position (or `None` to recenter). Only drawing reads it.
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer.filter(|p| p.x.is_finite() && p.y.is_finite());
    }

    /// Parallax shift for a layer drawn with `factor`; zero without a pointer or a
    /// configured parallax.
    pub fn parallax_offset(&self, factor: f64) -> Vec2 {
        match (self.config.parallax.as_ref(), self.pointer) {
            (Some(spec), Some(at)) => (at - self.viewport.center()) * (spec.strength * factor),
            _ => Vec2::ZERO,
        }
    }

    /// Emit one particle on route `index` right now. Returns `false` when the route does not
    /// exist or one of its anchors cannot be resolved.
    pub fn spawn_on_route(&mut self, index: usize) -> bool {
        let spawned = self.emit(index, None);
        self.enforce_cap();
        spawned
    }

    /// Advance the world by `dt_ms` (clamped to `[0, max_step_ms]`).
    pub fn step(&mut self, dt_ms: f64) -> StepStats {
        let dt = if dt_ms.is_finite() {
            dt_ms.clamp(0.0, self.config.max_step_ms)
        } else {
            0.0
        };
        self.elapsed_ms += dt;
        let now = self.elapsed_ms;
        let mut stats = StepStats::default();

        let rate = self.config.nodes.pulse_rate;
        for n in &mut self.nodes {
            n.advance(rate, dt);
        }

        stats.spawned += self.spawn_waves();
        let (arrived, fanned_out) = self.advance_particles(dt, now);
        stats.arrived = arrived;
        stats.spawned += fanned_out;
        stats.dropped = self.enforce_cap();

        if let Some(hub) = &mut self.hub {
            hub.sample(now);
        }
        for a in &mut self.agents {
            a.sample(now);
        }

        self.step_motes(dt);

        stats.particles = self.particles.len();
        stats.motes = self.motes.len();
        tracing::trace!(
            elapsed_ms = now,
            particles = stats.particles,
            motes = stats.motes,
            "simulation step"
        );
        stats
    }

    fn place_agents(&mut self) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        if let Some(hub) = &mut self.hub {
            hub.place(w, h);
        }
        for a in &mut self.agents {
            a.place(w, h);
        }
    }

    fn spawn_waves(&mut self) -> usize {
        if !self.config.has_source_routes() {
            return 0;
        }
        let waves = match self.config.spawn {
            SpawnPolicy::Interval { every_ms } => {
                let mut waves = 0;
                while self.next_wave_ms <= self.elapsed_ms && waves < self.config.max_particles {
                    self.next_wave_ms += every_ms;
                    waves += 1;
                }
                if self.next_wave_ms <= self.elapsed_ms {
                    self.next_wave_ms = self.elapsed_ms + every_ms;
                }
                waves
            }
            SpawnPolicy::Probability { per_frame } => {
                usize::from(self.rng.next_f64_01() < per_frame)
            }
        };

        let mut spawned = 0;
        for _ in 0..waves {
            for i in 0..self.config.routes.len() {
                if self.config.routes[i].from == Anchor::Nodes && self.emit(i, None) {
                    spawned += 1;
                }
            }
        }
        spawned
    }

    fn emit(&mut self, index: usize, from: Option<Point>) -> bool {
        let Some(route) = self.config.routes.get(index) else {
            return false;
        };
        let (route_from, route_to, curve, size) = (route.from, route.to, route.curve, route.size);
        let color = route.color.unwrap_or(self.config.palette.particle);

        let start = match from {
            Some(p) => Some(p),
            None => self.anchor_point(route_from),
        };
        let (Some(start), Some(end)) = (start, self.anchor_point(route_to)) else {
            return false;
        };
        self.particles.push_back(FlowParticle {
            path: ParticlePath::between(start, end, curve),
            progress: 0.0,
            color,
            size,
            route: index,
            target: route_to,
        });
        true
    }

    fn anchor_point(&mut self, anchor: Anchor) -> Option<Point> {
        match anchor {
            Anchor::Nodes if self.nodes.is_empty() => None,
            Anchor::Nodes => {
                let i = self.rng.index(self.nodes.len());
                Some(self.nodes[i].pos)
            }
            Anchor::Hub => self.hub.as_ref().map(|h| h.pos),
            Anchor::Agent(i) => self.agents.get(i).map(|a| a.pos),
        }
    }

    fn advance_particles(&mut self, dt: f64, now: f64) -> (usize, usize) {
        let delta = self.config.particle_speed * dt / 1000.0;
        let ease = self.config.ease;
        let radius = self.config.arrival_radius;

        let mut arrivals = Vec::new();
        self.particles.retain_mut(|p| {
            p.advance(delta);
            if p.has_arrived(ease, radius) {
                arrivals.push((p.target, p.path.end()));
                false
            } else {
                true
            }
        });

        let mut fanned_out = 0;
        for &(target, at) in &arrivals {
            match target {
                Anchor::Hub => {
                    if let Some(hub) = &mut self.hub {
                        hub.activate(now);
                    }
                }
                Anchor::Agent(i) => {
                    if let Some(a) = self.agents.get_mut(i) {
                        a.activate(now);
                    }
                }
                Anchor::Nodes => continue,
            }
            for i in 0..self.config.routes.len() {
                if self.config.routes[i].from == target && self.emit(i, Some(at)) {
                    fanned_out += 1;
                }
            }
        }
        (arrivals.len(), fanned_out)
    }

    fn enforce_cap(&mut self) -> usize {
        let cap = self.config.max_particles;
        let excess = self.particles.len().saturating_sub(cap);
        self.particles.drain(..excess);
        excess
    }

    fn step_motes(&mut self, dt: f64) {
        let config = Arc::clone(&self.config);
        let Some(spec) = config.motes.as_ref().filter(|m| !m.anchors.is_empty()) else {
            return;
        };

        self.motes.retain_mut(|m| m.advance(dt));

        let mut emitted = 0;
        while self.next_mote_ms <= self.elapsed_ms && emitted < spec.cap {
            self.next_mote_ms += spec.spawn_every_ms;
            emitted += 1;

            let anchor = spec.anchors[self.rng.index(spec.anchors.len())];
            let Some(center) = self.anchor_point(anchor) else {
                continue;
            };
            let jitter = Vec2::new(
                self.rng.range(-spec.jitter, spec.jitter),
                self.rng.range(-spec.jitter, spec.jitter),
            );
            let vel = Vec2::new(
                self.rng.range(-spec.drift, spec.drift),
                self.rng.range(-spec.drift, spec.drift) + self.rng.range(spec.rise[0], spec.rise[1]),
            );
            let mote = Mote {
                pos: center + jitter,
                vel,
                life: 1.0,
                life_span_ms: self.rng.range(spec.life_ms[0], spec.life_ms[1]),
                size: self.rng.range(spec.size[0], spec.size[1]),
                color: self.mote_color(anchor),
            };
            self.motes.push_back(mote);
        }
        if self.next_mote_ms <= self.elapsed_ms {
            self.next_mote_ms = self.elapsed_ms + spec.spawn_every_ms;
        }

        let excess = self.motes.len().saturating_sub(spec.cap);
        self.motes.drain(..excess);
    }

    fn mote_color(&self, anchor: Anchor) -> Rgba8 {
        let p = &self.config.palette;
        match anchor {
            Anchor::Nodes => p.node,
            Anchor::Hub => p.hub,
            Anchor::Agent(_) => p.agent,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/world.rs"]
mod tests;
