/// Convenience result type used across thumbforge.
pub type ThumbResult<T> = Result<T, ThumbError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Platform identifier missing from the active platform table.
    #[error("unknown platform '{0}'")]
    UnknownPlatform(String),

    /// No usable font could be loaded or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Raster backend failure (surface limits, buffer mismatches).
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    /// Build a [`ThumbError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThumbError::UnknownPlatform`] value.
    pub fn unknown_platform(id: impl Into<String>) -> Self {
        Self::UnknownPlatform(id.into())
    }

    /// Build a [`ThumbError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ThumbError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ThumbError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
