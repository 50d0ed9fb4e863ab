use thiserror::Error;

/// Errors from the parts of the crate that can fail. Scanning itself cannot; malformed
/// input is reported through [`crate::diagnostics`] instead.
#[derive(Debug, Error)]
pub enum InilexError {
    #[error("ConfigError: {0}")]
    Config(#[source] serde_json::Error),
    #[error("SerializeError: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InilexError>;
