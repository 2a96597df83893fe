//! Errors for the route loader and the demo runner
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtaError {
    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    ConfigurationError { message: String },

    #[error("CSV error")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error")]
    SerdeError(#[from] serde_json::Error),

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("Invalid departure time: {0}")]
    InvalidDepartureTime(String),

    #[error("Empty port name for vessel {0}")]
    EmptyPortName(String),

    #[error("No route for vessel {0}")]
    UnknownVessel(String),
}
