/// Convenience result type used across blockparty.
pub type BlockPartyResult<T> = Result<T, BlockPartyError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum BlockPartyError {
    /// Invalid user-provided data (colors, sizes, indices).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while writing persisted square state.
    #[error("storage error: {0}")]
    Storage(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Remote state service unreachable, timed out, or answered with a failure status.
    #[error("api error: {0}")]
    Api(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlockPartyError {
    /// Build a [`BlockPartyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlockPartyError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`BlockPartyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`BlockPartyError::Api`] value.
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
