// Error handling module
// Application error type shared by the session, the services and the CLI

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Serialize)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Fetch failed: {0}")]
    FetchError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Playback widget error: {0}")]
    PlayerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    #[serde(serialize_with = "serialize_io_error")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Other error: {0}")]
    Other(String),

    #[error(transparent)]
    #[serde(skip)]
    AnyhowError(#[from] anyhow::Error),
}

impl AppError {
    /// Stable tag used when the error is forwarded to the UI.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::FetchError(_) => "fetch",
            AppError::ApiError(_) => "api",
            AppError::PlayerError(_) => "player",
            AppError::StorageError(_) => "storage",
            AppError::ConfigurationError(_) => "configuration",
            AppError::IoError(_) => "io",
            AppError::SerializationError(_) => "serialization",
            AppError::Other(_) | AppError::AnyhowError(_) => "other",
        }
    }
}

// std::io::Error does not implement serde::Serialize
fn serialize_io_error<S>(err: &std::io::Error, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&err.to_string())
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ApiError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Other(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Other(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
