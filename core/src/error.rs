use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("invalid terrain configuration: {0}")]
    InvalidConfiguration(String),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

impl TerrainError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
