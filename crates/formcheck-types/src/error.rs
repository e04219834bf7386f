//! Error types for form-checker

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No API key found: pass one explicitly or set the GEMINI_API_KEY environment variable")]
    MissingCredential,

    #[error("No image supplied")]
    MissingInput,

    #[error("Authentication rejected by the model service: {0}")]
    Authentication(String),

    #[error("Model service error: {0}")]
    RemoteService(String),
}

pub type Result<T> = std::result::Result<T, Error>;
