/// Convenience result type used across facemap.
pub type FacemapResult<T> = Result<T, FacemapError>;

/// Top-level error taxonomy used by the compiler, packer and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum FacemapError {
    /// Invalid user-provided graph, project or header data.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image source could not be loaded or did not match the face raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// An export was refused before any output was produced.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FacemapError {
    /// Build a [`FacemapError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FacemapError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FacemapError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`FacemapError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FacemapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
