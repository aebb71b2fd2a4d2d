use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by [`LightboxContext::subscribe`].
    pub struct ListenerId;
}

/// What a lightbox shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MediaKind {
    /// Still image or animated GIF.
    #[default]
    Image,
    /// Looping muted video.
    Video,
}

/// One piece of media opened in the lightbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaItem {
    /// Media URL or path.
    pub src: String,
    /// Title shown above the media and used as alt text.
    pub title: String,
    /// Image or video.
    pub kind: MediaKind,
}

impl MediaItem {
    /// Image item.
    pub fn image(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            title: title.into(),
            kind: MediaKind::Image,
        }
    }

    /// Video item.
    pub fn video(src: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            ..Self::image(src, title)
        }
    }
}

/// Modal state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LightboxState {
    /// Nothing shown.
    #[default]
    Closed,
    /// Showing `media`; page scrolling is locked.
    Open {
        /// Displayed item.
        media: MediaItem,
    },
}

/// Key presses the lightbox reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKey {
    /// Closes an open lightbox.
    Escape,
    /// Anything else; ignored.
    Other,
}

type Listener = Box<dyn FnMut(&LightboxState)>;

/// Shared media-modal context handed to every component that can open media.
///
/// Owns the modal state and notifies subscribers on every change. Components receive the context
/// explicitly instead of discovering an "open" function on a global object.
#[derive(Default)]
pub struct LightboxContext {
    state: LightboxState,
    listeners: SlotMap<ListenerId, Listener>,
}

impl std::fmt::Debug for LightboxContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightboxContext")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl LightboxContext {
    /// Closed lightbox without listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    /// Whether page scrolling should be locked.
    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    /// Show `media`, replacing whatever is open.
    pub fn open(&mut self, media: MediaItem) {
        tracing::debug!(src = %media.src, "open lightbox");
        self.set(LightboxState::Open { media });
    }

    /// Close; a no-op when already closed.
    pub fn close(&mut self) {
        if self.is_open() {
            tracing::debug!("close lightbox");
            self.set(LightboxState::Closed);
        }
    }

    /// Route a key press. Returns `true` when it closed the lightbox.
    pub fn handle_key(&mut self, key: ModalKey) -> bool {
        if key == ModalKey::Escape && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    /// Clicking the backdrop (outside the content) closes the lightbox.
    pub fn backdrop_click(&mut self) {
        self.close();
    }

    /// Register a listener called with the new state after every change.
    pub fn subscribe(&mut self, listener: impl FnMut(&LightboxState) + 'static) -> ListenerId {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a listener; returns `false` for unknown ids.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn set(&mut self, state: LightboxState) {
        self.state = state;
        for listener in self.listeners.values_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/lightbox.rs"]
mod tests;
