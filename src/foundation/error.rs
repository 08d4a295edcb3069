/// Convenience result type used across bubbleline.
pub type BubblelineResult<T> = Result<T, BubblelineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Data-shape problems in a dataset (unknown phases, out-of-range anchors or sizes) are not
/// errors: they are skipped or clamped. These variants are reserved for host integration bugs.
#[derive(thiserror::Error, Debug)]
pub enum BubblelineError {
    /// Invalid host-provided settings or dataset structure.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while scheduling or sampling animations.
    #[error("animation error: {0}")]
    Animation(String),

    /// Degenerate geometry that cannot be laid out.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BubblelineError {
    /// Build a [`BubblelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BubblelineError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`BubblelineError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`BubblelineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BubblelineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
