//! Error types for routeguide

use thiserror::Error;

/// routeguide error type
#[derive(Error, Debug)]
pub enum NavError {
    #[error("GPX parse error: {0}")]
    Gpx(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No route found")]
    NoRoute,

    #[error("Route provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<::gpx::errors::GpxError> for NavError {
    fn from(e: ::gpx::errors::GpxError) -> Self {
        NavError::Gpx(e.to_string())
    }
}

#[cfg(feature = "osrm")]
impl From<reqwest::Error> for NavError {
    fn from(e: reqwest::Error) -> Self {
        NavError::Provider(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
