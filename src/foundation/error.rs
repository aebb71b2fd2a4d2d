/// Convenience result type used across Pulseflow.
pub type PulseResult<T> = Result<T, PulseError>;

/// Top-level error taxonomy used by surface and rendering APIs.
///
/// Expected degradations (no drawing surface, reduced motion) are not errors; they are surface
/// states. These variants cover invalid input and genuine backend failures.
#[derive(thiserror::Error, Debug)]
pub enum PulseError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or resolving a configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors from surface lifecycle misuse (for example drawing on an unmounted surface).
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors while rasterizing a frame or the static fallback.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PulseError {
    /// Build a [`PulseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PulseError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PulseError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`PulseError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PulseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
