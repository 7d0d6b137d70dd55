pub type TimegridResult<T> = Result<T, TimegridError>;

#[derive(thiserror::Error, Debug)]
pub enum TimegridError {
    /// Computed grid dimensions are unusable. Fatal to the render call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A font asset could not be loaded. Recovered locally by falling back
    /// to the builtin face; surfaced only when callers ask for strict mode.
    #[error("asset unavailable: {0}")]
    Asset(String),

    /// The raster encoder rejected the canvas. Fatal.
    #[error("encoding failure: {0}")]
    Encoding(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimegridError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
