/// Convenience result type used across the crate.
pub type PlateResult<T> = Result<T, PlateError>;

/// Top-level error taxonomy used by editor APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlateError {
    /// Invalid caller-provided data (geometry, sizes, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// A command referenced an element id that is not in the element list.
    #[error("unknown element: {0}")]
    UnknownElement(uuid::Uuid),

    /// Asset bytes could not be decoded or an asset key is missing.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors raised while rasterizing a render tree.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlateError {
    /// Build a [`PlateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlateError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PlateError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PlateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
