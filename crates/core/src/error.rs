//! Error types shared across nestwrite crates.
//!
//! The transform itself is total and never fails. Errors come from the
//! layers around it: reading payload files, parsing JSON and TOML, and
//! validating schema metadata.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the I/O, config and schema layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML config file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// A payload root was some other JSON type.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type actually found
        found: &'static str,
    },

    /// Schema metadata was rejected.
    #[error("schema error: {0}")]
    Schema(String),
}

impl Error {
    /// Create a schema error from any displayable reason.
    pub fn schema(reason: impl Into<String>) -> Self {
        Error::Schema(reason.into())
    }
}
