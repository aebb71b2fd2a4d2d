use std::sync::Arc;

use crate::{
    config::model::SurfaceConfig,
    env::scheduler::{FrameHandle, FrameScheduler},
    env::signal::{Environment, Signal, SignalTopic, SubscriptionId},
    fallback::StaticFallback,
    foundation::core::Viewport,
    foundation::error::{PulseError, PulseResult},
    render::backend::{BackendKind, FrameRGBA, RenderBackend, checked_dims, create_backend},
    render::plan::{FramePlan, compile_frame},
    sim::world::{Simulation, StepStats},
};

/// Lifecycle state of an [`AnimationSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    /// Not attached to an environment.
    Unmounted,
    /// Mounted, waiting for a non-empty measurement.
    Sizing,
    /// Showing the static fallback; no frames are ever requested.
    ReducedMotionStatic,
    /// Frame loop active; exactly one frame request is outstanding.
    Running,
    /// Loop suspended while the mount target is hidden.
    Paused,
    /// No drawing surface could be acquired; nothing is drawn.
    Placeholder,
}

/// Per-surface switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Animation enabled; when `false` the surface behaves as under reduced motion.
    pub enabled: bool,
    /// Raster backend used while running.
    pub backend: BackendKind,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: BackendKind::Cpu,
        }
    }
}

/// What one frame callback did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// Frames rendered since the loop started (1-based).
    pub frame: u64,
    /// Wall time since the loop started.
    pub elapsed_ms: f64,
    /// Simulated step applied this frame (after clamping).
    pub dt_ms: f64,
    /// Simulation counters.
    pub step: StepStats,
    /// Draw ops submitted to the backend.
    pub ops: usize,
}

/// A mounted decorative animation.
///
/// Drives the `Unmounted -> Sizing -> (ReducedMotionStatic | Running | Placeholder) -> Unmounted`
/// lifecycle (plus `Running <-> Paused` on visibility changes) against an [`Environment`] and a
/// [`FrameScheduler`]. Every exit from `Running` cancels the outstanding frame request, and
/// [`AnimationSurface::unmount`] also releases every environment subscription.
pub struct AnimationSurface {
    config: Arc<SurfaceConfig>,
    options: SurfaceOptions,
    state: SurfaceState,
    viewport: Option<Viewport>,
    subscriptions: Vec<SubscriptionId>,
    pending: Option<FrameHandle>,
    sim: Option<Simulation>,
    backend: Option<Box<dyn RenderBackend>>,
    fallback: Option<StaticFallback>,
    last_frame: Option<FrameRGBA>,
    loop_start_ms: Option<f64>,
    last_frame_ms: Option<f64>,
    frames: u64,
}

impl std::fmt::Debug for AnimationSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSurface")
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("pending", &self.pending)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl AnimationSurface {
    /// Create an unmounted surface. Fails when `config` does not validate.
    pub fn new(config: impl Into<Arc<SurfaceConfig>>, options: SurfaceOptions) -> PulseResult<Self> {
        let config = config.into();
        config.validate()?;
        Ok(Self {
            config,
            options,
            state: SurfaceState::Unmounted,
            viewport: None,
            subscriptions: Vec::new(),
            pending: None,
            sim: None,
            backend: None,
            fallback: None,
            last_frame: None,
            loop_start_ms: None,
            last_frame_ms: None,
            frames: 0,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Config this surface animates.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Options in effect.
    pub fn options(&self) -> SurfaceOptions {
        self.options
    }

    /// Drawable size used for subsequent frames.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Live simulation while running or paused.
    pub fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    /// Static fallback while in [`SurfaceState::ReducedMotionStatic`].
    pub fn fallback(&self) -> Option<&StaticFallback> {
        self.fallback.as_ref()
    }

    /// Accessible label currently exposed (the fallback's, when static).
    pub fn aria_label(&self) -> Option<&str> {
        self.fallback.as_ref().map(StaticFallback::aria_label)
    }

    /// Last rendered frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }

    /// Last plan, when the backend keeps it.
    pub fn last_plan(&self) -> Option<&FramePlan> {
        self.backend.as_deref().and_then(|b| b.last_plan())
    }

    /// Outstanding frame request.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames rendered since the current loop started.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Attach to `env`: subscribe to its signals, then size.
    #[tracing::instrument(skip_all, fields(surface = %self.config.name))]
    pub fn mount(
        &mut self,
        env: &mut dyn Environment,
        sched: &mut dyn FrameScheduler,
    ) -> PulseResult<()> {
        if self.state != SurfaceState::Unmounted {
            return Err(PulseError::surface(format!(
                "mount called in state {:?}",
                self.state
            )));
        }
        for topic in [
            SignalTopic::Resize,
            SignalTopic::MotionPreference,
            SignalTopic::Visibility,
        ] {
            self.subscriptions.push(env.subscribe(topic));
        }
        if self.config.parallax.is_some() {
            self.subscriptions.push(env.subscribe(SignalTopic::Pointer));
        }
        self.transition(SurfaceState::Sizing);
        self.size(env, sched);
        Ok(())
    }

    /// Frame callback for `handle` at host time `now_ms`.
    ///
    /// Returns `Ok(None)` for stale handles or when not running. A backend failure is returned
    /// and leaves the surface in [`SurfaceState::Placeholder`] without a new request.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        now_ms: f64,
        sched: &mut dyn FrameScheduler,
    ) -> PulseResult<Option<FrameStats>> {
        if self.pending != Some(handle) || self.state != SurfaceState::Running {
            tracing::trace!(handle = handle.id(), state = ?self.state, "ignore stale frame");
            return Ok(None);
        }
        self.pending = None;

        let (Some(sim), Some(backend), Some(viewport)) =
            (self.sim.as_mut(), self.backend.as_mut(), self.viewport)
        else {
            return Err(PulseError::surface("running without simulation or backend"));
        };

        let start = *self.loop_start_ms.get_or_insert(now_ms);
        let elapsed_ms = now_ms - start;
        let raw_dt = self.last_frame_ms.map_or(0.0, |last| now_ms - last);
        self.last_frame_ms = Some(now_ms);

        let before = sim.elapsed_ms();
        let step = sim.step(raw_dt);
        let dt_ms = sim.elapsed_ms() - before;

        let plan = compile_frame(sim, viewport);
        let frame = match backend.render_plan(&plan) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::warn!(error = %err, "frame render failed; stopping loop");
                self.teardown_loop(sched);
                self.transition(SurfaceState::Placeholder);
                return Err(err);
            }
        };
        self.last_frame = Some(frame);
        self.frames += 1;
        self.pending = Some(sched.request_frame());

        tracing::trace!(
            frame = self.frames,
            particles = step.particles,
            ops = plan.ops.len(),
            "frame"
        );
        Ok(Some(FrameStats {
            frame: self.frames,
            elapsed_ms,
            dt_ms,
            step,
            ops: plan.ops.len(),
        }))
    }

    /// React to an environment signal.
    pub fn handle_signal(
        &mut self,
        signal: Signal,
        env: &mut dyn Environment,
        sched: &mut dyn FrameScheduler,
    ) {
        tracing::debug!(?signal, state = ?self.state, "signal");
        match (signal, self.state) {
            (_, SurfaceState::Unmounted) => {}
            (Signal::Resized, SurfaceState::Sizing | SurfaceState::Placeholder) => {
                self.size(env, sched);
            }
            (Signal::Resized, SurfaceState::Running | SurfaceState::Paused) => {
                self.resize(env, sched);
            }
            (Signal::Resized, SurfaceState::ReducedMotionStatic) => {}
            (Signal::ReducedMotion(true), SurfaceState::ReducedMotionStatic) => {}
            (Signal::ReducedMotion(true), _) => {
                self.teardown_loop(sched);
                self.enter_static();
            }
            (Signal::ReducedMotion(false), SurfaceState::ReducedMotionStatic) => {
                if self.options.enabled {
                    self.restart(env, sched);
                }
            }
            (Signal::ReducedMotion(false), _) => {}
            (Signal::Visibility(false), SurfaceState::Running) => {
                if let Some(h) = self.pending.take() {
                    sched.cancel_frame(h);
                }
                self.last_frame_ms = None;
                self.transition(SurfaceState::Paused);
            }
            (Signal::Visibility(true), SurfaceState::Paused) => {
                self.transition(SurfaceState::Running);
                self.pending = Some(sched.request_frame());
            }
            (Signal::Visibility(_), _) => {}
            (Signal::Pointer(at), SurfaceState::Running | SurfaceState::Paused) => {
                if let Some(sim) = self.sim.as_mut() {
                    sim.set_pointer(Some(at));
                }
            }
            (Signal::Pointer(_), _) => {}
        }
    }

    /// Enable or disable the animation. Disabling behaves like reduced motion.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        env: &mut dyn Environment,
        sched: &mut dyn FrameScheduler,
    ) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        match self.state {
            SurfaceState::Unmounted | SurfaceState::Placeholder => {}
            SurfaceState::ReducedMotionStatic => {
                if enabled && !env.prefers_reduced_motion() {
                    self.restart(env, sched);
                }
            }
            SurfaceState::Sizing | SurfaceState::Running | SurfaceState::Paused => {
                if !enabled {
                    self.teardown_loop(sched);
                    self.enter_static();
                }
            }
        }
    }

    /// Detach: cancel the outstanding frame, release every subscription and drop the drawing
    /// resources. Safe to call in any state, any number of times.
    pub fn unmount(&mut self, env: &mut dyn Environment, sched: &mut dyn FrameScheduler) {
        if self.state == SurfaceState::Unmounted {
            return;
        }
        self.teardown_loop(sched);
        for id in self.subscriptions.drain(..) {
            env.unsubscribe(id);
        }
        self.fallback = None;
        self.last_frame = None;
        self.viewport = None;
        self.transition(SurfaceState::Unmounted);
    }

    #[tracing::instrument(skip_all, fields(surface = %self.config.name))]
    fn size(&mut self, env: &mut dyn Environment, sched: &mut dyn FrameScheduler) {
        if env.prefers_reduced_motion() || !self.options.enabled {
            self.enter_static();
            return;
        }
        if !env.surface_available() {
            tracing::debug!("no drawing surface available");
            self.transition(SurfaceState::Placeholder);
            return;
        }
        let Some(viewport) = self.measure(env) else {
            tracing::debug!("mount target not laid out yet; waiting for resize");
            self.transition(SurfaceState::Sizing);
            return;
        };
        let backend = match create_backend(self.options.backend, viewport) {
            Ok(backend) => backend,
            Err(err) => {
                tracing::warn!(error = %err, "backend unavailable; showing placeholder");
                self.transition(SurfaceState::Placeholder);
                return;
            }
        };
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            dpr = viewport.dpr,
            backend = backend.name(),
            "start loop"
        );

        self.viewport = Some(viewport);
        self.sim = Some(Simulation::new(Arc::clone(&self.config), viewport));
        self.backend = Some(backend);
        self.loop_start_ms = None;
        self.last_frame_ms = None;
        self.frames = 0;

        if env.is_visible() {
            self.transition(SurfaceState::Running);
            self.pending = Some(sched.request_frame());
        } else {
            self.transition(SurfaceState::Paused);
        }
    }

    fn measure(&self, env: &dyn Environment) -> Option<Viewport> {
        let raw = env.measure()?;
        Viewport::measured(raw.width, raw.height, raw.dpr.max(1.0), self.config.max_dpr)
    }

    fn resize(&mut self, env: &dyn Environment, sched: &mut dyn FrameScheduler) {
        let Some(viewport) = self.measure(env) else {
            tracing::debug!("resize to an empty box ignored");
            return;
        };
        if self.options.backend == BackendKind::Cpu
            && let Err(err) = checked_dims(viewport.pixel_width(), viewport.pixel_height())
        {
            tracing::warn!(error = %err, "resized surface cannot be drawn; showing placeholder");
            self.teardown_loop(sched);
            self.viewport = None;
            self.transition(SurfaceState::Placeholder);
            return;
        }
        self.viewport = Some(viewport);
        if let Some(sim) = self.sim.as_mut() {
            sim.resize(viewport);
        }
    }

    fn restart(&mut self, env: &mut dyn Environment, sched: &mut dyn FrameScheduler) {
        self.fallback = None;
        self.transition(SurfaceState::Sizing);
        self.size(env, sched);
    }

    fn enter_static(&mut self) {
        match StaticFallback::build(&self.config) {
            Ok(fallback) => {
                self.fallback = Some(fallback);
                self.transition(SurfaceState::ReducedMotionStatic);
            }
            Err(err) => {
                tracing::warn!(error = %err, "static fallback unavailable; showing placeholder");
                self.transition(SurfaceState::Placeholder);
            }
        }
    }

    fn teardown_loop(&mut self, sched: &mut dyn FrameScheduler) {
        if let Some(h) = self.pending.take() {
            sched.cancel_frame(h);
        }
        self.sim = None;
        self.backend = None;
        self.loop_start_ms = None;
        self.last_frame_ms = None;
    }

    fn transition(&mut self, next: SurfaceState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "surface state");
            self.state = next;
        }
    }
}

impl Drop for AnimationSurface {
    fn drop(&mut self) {
        if let Some(h) = self.pending {
            tracing::warn!(
                surface = %self.config.name,
                handle = h.id(),
                "surface dropped with an outstanding frame request; call unmount first"
            );
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/surface.rs"]
mod tests;
