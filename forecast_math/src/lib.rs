//! # Forecast Math
//!
//! Numerical building blocks shared by the forecasting strategies.
//! Everything in this crate is a pure calculation over `f64` slices:
//! - Accuracy metrics (MAE, RMSE, MAPE, R²)
//! - Critical values for interval widths (z-score and small-sample t-score)
//! - Trailing moving averages
//! - Simple and double (Holt) exponential smoothing recurrences
//! - Least-squares trend regression over the series index

use thiserror::Error;

pub mod critical_values;
pub mod metrics;
pub mod moving_averages;
pub mod regression;
pub mod smoothing;
pub mod stats;

pub use critical_values::{t_score, z_score, CriticalValueMethod};
pub use regression::IndexRegression;

/// Errors that can occur in forecasting calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
