//! Error types for the forecast_core crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the forecast_core crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed time series: missing, mismatched or too few points, or NaN values
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Out-of-range or inconsistent configuration parameters
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A prediction was requested before the model was fitted
    #[error("Model must be fitted before prediction")]
    UntrainedModelError,

    /// Error from the numerical building blocks
    #[error("Math error: {0}")]
    MathError(#[from] MathError),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error from CSV export
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
