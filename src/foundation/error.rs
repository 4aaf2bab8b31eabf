/// Convenience result type used across trailstage.
pub type TrailResult<T> = Result<T, TrailError>;

/// Error taxonomy for the edges of the stage (configuration, manifests, scripts).
///
/// Runtime operations on a live session never fail; ignored input is a silent no-op.
#[derive(thiserror::Error, Debug)]
pub enum TrailError {
    /// Invalid user-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Stage configuration that cannot be used.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailError {
    /// Build a [`TrailError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrailError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TrailError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TrailError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
