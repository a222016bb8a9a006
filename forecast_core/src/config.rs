//! Forecast configuration
//!
//! [`ForecastConfig`] is the single configuration surface of the crate. It is
//! serde-enabled (camelCase keys) so it can be stored alongside results or
//! loaded from JSON.

use crate::error::{ForecastError, Result};
use forecast_math::CriticalValueMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default trailing window for the moving average
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Forecasting strategy identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Flat forecast from the last trailing average
    MovingAverage,
    /// Simple or Holt exponential smoothing
    ExponentialSmoothing,
    /// Least-squares trend extrapolation
    LinearTrend,
}

impl ForecastMethod {
    /// All supported methods
    pub const ALL: [ForecastMethod; 3] = [
        ForecastMethod::MovingAverage,
        ForecastMethod::ExponentialSmoothing,
        ForecastMethod::LinearTrend,
    ];

    /// Stable name used on the wire and in exports
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::ExponentialSmoothing => "exponential_smoothing",
            ForecastMethod::LinearTrend => "linear_trend",
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastMethod {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        ForecastMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ForecastError::ConfigurationError(format!("Unknown forecast method: {}", s)))
    }
}

/// Per-method options; each strategy reads only its own fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastParameters {
    /// Trailing window for the moving average
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    /// Level smoothing factor for exponential smoothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Trend smoothing factor; switches exponential smoothing to Holt's method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    /// Requested degree for the trend fit (only degree 1 is computed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polynomial_degree: Option<u32>,
}

/// Configuration for a single forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastConfig {
    /// Strategy to use
    pub method: ForecastMethod,
    /// Strategy options
    #[serde(default)]
    pub parameters: ForecastParameters,
    /// Number of future periods to forecast
    pub forecast_horizon: usize,
    /// Fraction of the series used for training in holdout evaluation
    pub train_test_split: f64,
    /// Confidence level of the prediction intervals
    pub confidence_level: f64,
    /// Source of the critical values that scale interval widths
    #[serde(default)]
    pub critical_values: CriticalValueMethod,
}

impl ForecastConfig {
    /// Create a configuration for `method` with default settings:
    /// 12 periods, 80/20 split, 95% intervals, table critical values
    pub fn new(method: ForecastMethod) -> Self {
        Self {
            method,
            parameters: ForecastParameters::default(),
            forecast_horizon: 12,
            train_test_split: 0.8,
            confidence_level: 0.95,
            critical_values: CriticalValueMethod::Table,
        }
    }

    /// Load a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the forecast horizon
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.forecast_horizon = horizon;
        self
    }

    /// Set the training fraction
    pub fn with_train_test_split(mut self, split: f64) -> Self {
        self.train_test_split = split;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Set the critical value source
    pub fn with_critical_values(mut self, method: CriticalValueMethod) -> Self {
        self.critical_values = method;
        self
    }

    /// Set the moving average window
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.parameters.window_size = Some(window_size);
        self
    }

    /// Set the level smoothing factor
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.parameters.alpha = Some(alpha);
        self
    }

    /// Set the trend smoothing factor
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.parameters.beta = Some(beta);
        self
    }

    /// Set the requested polynomial degree
    pub fn with_polynomial_degree(mut self, degree: u32) -> Self {
        self.parameters.polynomial_degree = Some(degree);
        self
    }

    /// Check the general configuration ranges
    ///
    /// Method-specific parameters are checked by the strategy that uses them.
    pub fn validate(&self) -> Result<()> {
        if self.forecast_horizon == 0 {
            return Err(ForecastError::ConfigurationError(
                "Forecast horizon must be greater than zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.train_test_split) {
            return Err(ForecastError::ConfigurationError(format!(
                "Train/test split must be between 0 and 1, got {}",
                self.train_test_split
            )));
        }

        if !(0.0..=1.0).contains(&self.confidence_level) {
            return Err(ForecastError::ConfigurationError(format!(
                "Confidence level must be between 0 and 1, got {}",
                self.confidence_level
            )));
        }

        if self.critical_values == CriticalValueMethod::Exact
            && (self.confidence_level == 0.0 || self.confidence_level == 1.0)
        {
            return Err(ForecastError::ConfigurationError(
                "Exact critical values need a confidence level strictly between 0 and 1"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
