use std::collections::VecDeque;

use slotmap::{SlotMap, new_key_type};

use crate::foundation::core::{Point, Viewport};

new_key_type! {
    /// Handle returned by [`Environment::subscribe`].
    pub struct SubscriptionId;
}

/// Category of environment change an observer can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalTopic {
    /// Mount target size or pixel density changed.
    Resize,
    /// The reduced-motion preference changed.
    MotionPreference,
    /// The mount target became visible or hidden.
    Visibility,
    /// The pointer moved over the mount target.
    Pointer,
}

/// One environment change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    /// Re-measure the mount target.
    Resized,
    /// New reduced-motion preference.
    ReducedMotion(bool),
    /// New visibility.
    Visibility(bool),
    /// Pointer position in logical pixels relative to the mount target.
    Pointer(Point),
}

impl Signal {
    /// Topic this signal is delivered on.
    pub fn topic(self) -> SignalTopic {
        match self {
            Self::Resized => SignalTopic::Resize,
            Self::ReducedMotion(_) => SignalTopic::MotionPreference,
            Self::Visibility(_) => SignalTopic::Visibility,
            Self::Pointer(_) => SignalTopic::Pointer,
        }
    }
}

/// Everything an animation surface reads from its host.
///
/// Observers are registered explicitly and must be released with [`Environment::unsubscribe`];
/// the host delivers [`Signal`]s for subscribed topics to the surface's `handle_signal`.
pub trait Environment {
    /// Current drawable size and pixel ratio, or `None` while layout has not produced a
    /// non-empty box.
    fn measure(&self) -> Option<Viewport>;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the mount target is currently visible.
    fn is_visible(&self) -> bool;

    /// Whether a drawing surface can be acquired here at all.
    fn surface_available(&self) -> bool;

    /// Start observing `topic`.
    fn subscribe(&mut self, topic: SignalTopic) -> SubscriptionId;

    /// Stop observing; returns `false` for unknown or already released ids.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// In-memory [`Environment`] for headless rendering and tests.
///
/// Setters update the state and queue the matching [`Signal`] when at least one observer is
/// subscribed to its topic; hosts forward queued signals with [`HeadlessEnvironment::drain_signals`].
#[derive(Debug)]
pub struct HeadlessEnvironment {
    width: f64,
    height: f64,
    dpr: f64,
    reduced_motion: bool,
    visible: bool,
    surface_available: bool,
    pointer: Option<Point>,
    subscriptions: SlotMap<SubscriptionId, SignalTopic>,
    queue: VecDeque<Signal>,
}

impl HeadlessEnvironment {
    /// Visible environment with a drawing surface and the given layout.
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            width,
            height,
            dpr,
            reduced_motion: false,
            visible: true,
            surface_available: true,
            pointer: None,
            subscriptions: SlotMap::with_key(),
            queue: VecDeque::new(),
        }
    }

    /// Environment whose layout has not been committed yet (zero-size box).
    pub fn unmeasured() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Builder-style reduced-motion preference.
    pub fn with_reduced_motion(mut self, on: bool) -> Self {
        self.reduced_motion = on;
        self
    }

    /// Builder-style surface availability (`false` models server-side rendering).
    pub fn with_surface_available(mut self, available: bool) -> Self {
        self.surface_available = available;
        self
    }

    /// Change the logical size of the mount target.
    pub fn set_size(&mut self, width: f64, height: f64) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.emit(Signal::Resized);
        }
    }

    /// Change the device pixel ratio.
    pub fn set_dpr(&mut self, dpr: f64) {
        if self.dpr != dpr {
            self.dpr = dpr;
            self.emit(Signal::Resized);
        }
    }

    /// Change the reduced-motion preference.
    pub fn set_reduced_motion(&mut self, on: bool) {
        if self.reduced_motion != on {
            self.reduced_motion = on;
            self.emit(Signal::ReducedMotion(on));
        }
    }

    /// Change visibility.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.emit(Signal::Visibility(visible));
        }
    }

    /// Move the pointer over the mount target.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        let at = Point::new(x, y);
        if self.pointer != Some(at) {
            self.pointer = Some(at);
            self.emit(Signal::Pointer(at));
        }
    }

    /// Change surface availability. No signal is emitted; it is only read at sizing time.
    pub fn set_surface_available(&mut self, available: bool) {
        self.surface_available = available;
    }

    /// Take every queued signal in emission order.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.queue.drain(..).collect()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether anyone observes `topic`.
    pub fn is_observed(&self, topic: SignalTopic) -> bool {
        self.subscriptions.values().any(|&t| t == topic)
    }

    fn emit(&mut self, signal: Signal) {
        if self.is_observed(signal.topic()) {
            self.queue.push_back(signal);
        }
    }
}

impl Environment for HeadlessEnvironment {
    fn measure(&self) -> Option<Viewport> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return None;
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let dpr = if self.dpr.is_finite() && self.dpr > 0.0 {
            self.dpr
        } else {
            1.0
        };
        Some(Viewport {
            width: self.width,
            height: self.height,
            dpr,
        })
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn surface_available(&self) -> bool {
        self.surface_available
    }

    fn subscribe(&mut self, topic: SignalTopic) -> SubscriptionId {
        self.subscriptions.insert(topic)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(id).is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/env/signal.rs"]
mod tests;
