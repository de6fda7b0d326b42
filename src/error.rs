//! Error types for toilet-finder

use thiserror::Error;

/// Main error type for toilet-finder operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch dataset: {0}")]
    DataFetch(String),

    #[error("Failed to parse dataset: {0}")]
    DataParse(String),

    #[error("Geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for toilet-finder operations
pub type Result<T> = std::result::Result<T, Error>;
