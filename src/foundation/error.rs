/// Convenience result type used across folio-motion.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy for the animation engine.
///
/// Configuration errors are static data bugs and surface at setup. Resource
/// errors are cosmetic: callers degrade the affected effect instead of failing
/// the page.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid generation range, map, falloff or other per-page constant.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A drawing surface (or similar host resource) could not be acquired.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Invalid caller-provided data outside of static configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing config records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`MotionError::ResourceUnavailable`] value.
    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that only disable a decorative effect.
    pub fn is_cosmetic(&self) -> bool {
        matches!(self, Self::ResourceUnavailable(_))
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
