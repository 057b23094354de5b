//! Error handling module for the crosst CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the crosst CLI application.
#[derive(Error, Debug)]
pub enum CrosstError {
    /// Error when a required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when the conversion itself reports failure.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the driver boundary (bad direction or language tag).
    #[error("{0}")]
    Driver(#[from] crossc_drv::DriverError),
}

/// Result type alias using CrosstError.
pub type Result<T> = std::result::Result<T, CrosstError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CrosstError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CrosstError::Validation("no input file".to_string());
        assert_eq!(err.to_string(), "Validation error: no input file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CrosstError = io_err.into();
        assert!(matches!(err, CrosstError::Io(_)));
    }

    #[test]
    fn test_driver_error_conversion() {
        let err: CrosstError = "nope".parse::<crossc_drv::Direction>().unwrap_err().into();
        assert!(err.to_string().contains("nope"));
    }
}
