//! Error types for tierrate
//!
//! Rule parsing and cost resolution never fail. These errors only surface
//! where configuration is read from disk or the command line.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// tierrate errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
