//! Bridge error types

use thiserror::Error;
use wind_gateway_core::CoreError;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Bridge answered with a non-success status
    #[error("Bridge returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Reply body was not the expected JSON
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid bridge URL
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

impl From<BridgeError> for CoreError {
    fn from(err: BridgeError) -> Self {
        CoreError::Backend(err.to_string())
    }
}
