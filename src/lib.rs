//! Pulseflow is a decorative node/particle flow animation surface.
//!
//! A mounted [`AnimationSurface`] paints a small simulated world (pulsing nodes, flow particles
//! travelling along a route topology, and decorative agents that glow when a particle arrives)
//! on a frame-callback loop. When the environment asks for reduced motion the surface renders a
//! static SVG diagram with an accessible label instead and never schedules a frame.
//!
//! # Pipeline overview
//!
//! 1. **Simulate**: `Simulation::step` advances nodes, particles, glows and motes for one frame.
//! 2. **Compile**: `Simulation -> FramePlan` (backend-agnostic draw ops in logical pixels).
//! 3. **Render**: `FramePlan -> FrameRGBA` (CPU backend powered by `vello_cpu`).
//!
//! The host environment is abstracted behind [`Environment`] (measurement and signals) and
//! [`FrameScheduler`] (the "run again before next repaint" primitive), so the whole lifecycle can
//! be driven headlessly with [`HeadlessEnvironment`] and [`ManualScheduler`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod env;
mod fallback;
mod foundation;
mod lightbox;
mod render;
mod sim;
mod surface;

pub use animation::ease::Ease;
pub use animation::glow::GlowPulse;
pub use config::dsl::SurfaceConfigBuilder;
pub use config::model::{
    AgentKind, AgentSpec, Anchor, FallbackSpec, HubSpec, MoteSpec, NodeFieldSpec, Palette,
    ParallaxSpec, PathCurve, Region, Route, SpawnPolicy, SurfaceConfig,
};
pub use config::presets::{PRESET_NAMES, preset};
pub use env::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use env::signal::{Environment, HeadlessEnvironment, Signal, SignalTopic, SubscriptionId};
pub use fallback::StaticFallback;
pub use foundation::color::Rgba8;
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul, Rng64, Vec2, Viewport};
pub use foundation::error::{PulseError, PulseResult};
pub use lightbox::{LightboxContext, LightboxState, ListenerId, MediaItem, MediaKind, ModalKey};
pub use render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use render::cpu::CpuBackend;
pub use render::plan::{DrawOp, FramePlan, compile_frame};
pub use render::recording::RecordingBackend;
pub use sim::agent::Agent;
pub use sim::mote::Mote;
pub use sim::node::SimNode;
pub use sim::particle::{FlowParticle, ParticlePath};
pub use sim::world::{Simulation, StepStats};
pub use surface::{AnimationSurface, FrameStats, SurfaceOptions, SurfaceState};
