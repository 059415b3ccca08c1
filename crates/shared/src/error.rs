//! Error types for the agency binary's setup phase

use thiserror::Error;

/// General agency error type
#[derive(Debug, Error)]
pub enum AgencyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AgencyError>;
