//! Error types for the Hydronom feeder

use thiserror::Error;

/// Feeder error type
///
/// Covers startup and configuration failures. Per-tick delivery failures
/// are reported separately through [`crate::sink::DeliveryError`] and never
/// stop the loop.
#[derive(Error, Debug)]
pub enum FeederError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Signal handler error: {0}")]
    Signal(String),
}

impl From<toml::de::Error> for FeederError {
    fn from(e: toml::de::Error) -> Self {
        FeederError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for FeederError {
    fn from(e: serde_json::Error) -> Self {
        FeederError::Serialization(e.to_string())
    }
}

impl From<ctrlc::Error> for FeederError {
    fn from(e: ctrlc::Error) -> Self {
        FeederError::Signal(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeederError>;
