//! Error types for restyle

use thiserror::Error;

/// Result type alias for restyle operations
pub type Result<T> = std::result::Result<T, StyleError>;

/// Errors raised while loading configuration or compiling patterns
///
/// The styling pass itself never fails; these only surface from
/// configuration loading and explicit pattern compilation.
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid value for `{key}`: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{0}")]
    Message(String),
}

impl StyleError {
    /// Build an `InvalidValue` error from anything displayable
    pub fn invalid(key: &str, value: impl std::fmt::Display) -> Self {
        StyleError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}
