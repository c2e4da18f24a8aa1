//! Error types for Itemd

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum ItemdError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Itemd operations
pub type Result<T> = std::result::Result<T, ItemdError>;
