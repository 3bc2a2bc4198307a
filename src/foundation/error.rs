/// Convenience result type used across maskbloom.
pub type MaskResult<T> = Result<T, MaskError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal to the run that produced it; the engine has no transient failures.
#[derive(thiserror::Error, Debug)]
pub enum MaskError {
    /// Schedule, color, palette or easing text that does not match its grammar.
    #[error("parse error: {0}")]
    Parse(String),

    /// A configuration value outside its legal domain.
    #[error("range error: {0}")]
    Range(String),

    /// Frame sizes, frame counts or signal lengths that do not line up.
    #[error("shape mismatch: {0}")]
    Shape(String),

    /// Structurally invalid job configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskError {
    /// Build a [`MaskError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`MaskError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`MaskError::Shape`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Build a [`MaskError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MaskError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
