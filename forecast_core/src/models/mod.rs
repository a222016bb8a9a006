//! Forecasting strategies for time series data
//!
//! Every strategy implements [`Forecaster`]: `fit` validates the inputs and
//! returns an immutable [`TrainedForecaster`], which can `predict` any number
//! of horizons. [`TrainedModel`] dispatches over the three strategies by
//! [`ForecastMethod`].

use crate::config::{ForecastConfig, ForecastMethod};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::metrics::ForecastMetrics;
use chrono::{DateTime, Utc};
use forecast_math::MathError;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod exponential_smoothing;
pub mod linear_trend;
pub mod moving_average;

pub use exponential_smoothing::{ExponentialSmoothingForecaster, TrainedExponentialSmoothing};
pub use linear_trend::{LinearTrendForecaster, TrainedLinearTrend};
pub use moving_average::{MovingAverageForecaster, TrainedMovingAverage};

/// Smallest interval half-width any strategy reports
///
/// Applies when the residuals are degenerate, e.g. a perfect fit.
pub const MIN_INTERVAL_HALF_WIDTH: f64 = 0.1;

/// Lower and upper bounds of the prediction intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    /// Lower bounds, one per forecast step
    pub lower: Vec<f64>,
    /// Upper bounds, one per forecast step
    pub upper: Vec<f64>,
}

/// Timestamps of the fitted history and of the forecast steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTimestamps {
    /// Timestamps of the training data
    pub historical: Vec<DateTime<Utc>>,
    /// Timestamps of the forecast steps
    pub forecast: Vec<DateTime<Utc>>,
}

/// Forecast result containing predictions, intervals and diagnostics
///
/// Every number in a result is finite and each prediction lies within its
/// interval; construction and deserialization both enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredResult")]
pub struct ForecastResult {
    method: ForecastMethod,
    fitted_values: Vec<f64>,
    predictions: Vec<f64>,
    confidence_intervals: ConfidenceIntervals,
    metrics: ForecastMetrics,
    timestamps: ForecastTimestamps,
}

impl ForecastResult {
    /// Create a forecast result from symmetric interval half-widths
    pub fn new(
        method: ForecastMethod,
        fitted_values: Vec<f64>,
        predictions: Vec<f64>,
        half_widths: &[f64],
        metrics: ForecastMetrics,
        timestamps: ForecastTimestamps,
    ) -> Result<Self> {
        if predictions.len() != half_widths.len() {
            return Err(ForecastError::ValidationError(format!(
                "Predictions length ({}) doesn't match intervals length ({})",
                predictions.len(),
                half_widths.len()
            )));
        }

        if predictions.len() != timestamps.forecast.len() {
            return Err(ForecastError::ValidationError(format!(
                "Predictions length ({}) doesn't match forecast timestamps ({})",
                predictions.len(),
                timestamps.forecast.len()
            )));
        }

        let lower = predictions
            .iter()
            .zip(half_widths)
            .map(|(p, w)| p - w)
            .collect();
        let upper = predictions
            .iter()
            .zip(half_widths)
            .map(|(p, w)| p + w)
            .collect();

        let result = Self {
            method,
            fitted_values,
            predictions,
            confidence_intervals: ConfidenceIntervals { lower, upper },
            metrics,
            timestamps,
        };
        result.check()?;
        Ok(result)
    }

    /// Invariants shared by [`ForecastResult::new`] and deserialization
    fn check(&self) -> Result<()> {
        let horizon = self.predictions.len();
        let intervals = &self.confidence_intervals;
        if intervals.lower.len() != horizon
            || intervals.upper.len() != horizon
            || self.timestamps.forecast.len() != horizon
        {
            return Err(ForecastError::ValidationError(format!(
                "Forecast of {} steps has {} lower bounds, {} upper bounds and {} timestamps",
                horizon,
                intervals.lower.len(),
                intervals.upper.len(),
                self.timestamps.forecast.len()
            )));
        }

        if self.fitted_values.len() > self.timestamps.historical.len() {
            return Err(ForecastError::ValidationError(format!(
                "{} fitted values for {} historical timestamps",
                self.fitted_values.len(),
                self.timestamps.historical.len()
            )));
        }

        // Sums over extreme magnitudes overflow to inf or NaN
        let mut numbers = self
            .fitted_values
            .iter()
            .chain(&self.predictions)
            .chain(&intervals.lower)
            .chain(&intervals.upper);
        if !self.metrics.is_finite() || numbers.any(|v| !v.is_finite()) {
            return Err(MathError::CalculationError(format!(
                "{} forecast is not finite; the series magnitude is out of range",
                self.method
            ))
            .into());
        }

        let outside = self
            .predictions
            .iter()
            .zip(intervals.lower.iter().zip(&intervals.upper))
            .position(|(p, (lower, upper))| !(lower <= p && p <= upper));
        if let Some(step) = outside {
            return Err(ForecastError::ValidationError(format!(
                "Prediction at step {} lies outside its interval",
                step
            )));
        }

        Ok(())
    }

    /// Strategy that produced the result
    pub fn method(&self) -> ForecastMethod {
        self.method
    }

    /// In-sample estimates
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted_values
    }

    /// Forecasted values
    pub fn predictions(&self) -> &[f64] {
        &self.predictions
    }

    /// Number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }

    /// Interval bounds
    pub fn confidence_intervals(&self) -> &ConfidenceIntervals {
        &self.confidence_intervals
    }

    /// Interval bounds as `(lower, upper)` pairs
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.confidence_intervals
            .lower
            .iter()
            .copied()
            .zip(self.confidence_intervals.upper.iter().copied())
    }

    /// Accuracy metrics of the fit
    pub fn metrics(&self) -> &ForecastMetrics {
        &self.metrics
    }

    /// Historical and forecast timestamps
    pub fn timestamps(&self) -> &ForecastTimestamps {
        &self.timestamps
    }
}

/// Wire form of [`ForecastResult`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredResult {
    method: ForecastMethod,
    fitted_values: Vec<f64>,
    predictions: Vec<f64>,
    confidence_intervals: ConfidenceIntervals,
    metrics: ForecastMetrics,
    timestamps: ForecastTimestamps,
}

impl TryFrom<StoredResult> for ForecastResult {
    type Error = ForecastError;

    fn try_from(stored: StoredResult) -> Result<Self> {
        let result = ForecastResult {
            method: stored.method,
            fitted_values: stored.fitted_values,
            predictions: stored.predictions,
            confidence_intervals: stored.confidence_intervals,
            metrics: stored.metrics,
            timestamps: stored.timestamps,
        };
        result.check()?;
        Ok(result)
    }
}

/// Forecasting strategy that can be fitted to a time series
pub trait Forecaster: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecaster;

    /// Strategy identifier
    fn method(&self) -> ForecastMethod;

    /// Name of the strategy
    fn method_name(&self) -> &'static str {
        self.method().as_str()
    }

    /// Validate the inputs and fit the strategy
    fn fit(&self, data: &TimeSeriesData, config: &ForecastConfig) -> Result<Self::Trained>;
}

/// Fitted forecasting model
pub trait TrainedForecaster: Debug {
    /// Strategy identifier
    fn method(&self) -> ForecastMethod;

    /// In-sample estimates produced by the fit
    fn fitted_values(&self) -> &[f64];

    /// Accuracy metrics of the fit
    fn metrics(&self) -> &ForecastMetrics;

    /// Generate a forecast for `horizon` future periods
    fn predict(&self, horizon: usize) -> Result<ForecastResult>;
}

/// Shared input checks run by every `fit`, in order: data shape, general
/// configuration ranges, then method consistency.
pub(crate) fn validate_fit(
    data: &TimeSeriesData,
    config: &ForecastConfig,
    method: ForecastMethod,
) -> Result<()> {
    data.validate()?;
    config.validate()?;

    if config.method != method {
        return Err(ForecastError::ConfigurationError(format!(
            "Configuration is for {} but the forecaster is {}",
            config.method, method
        )));
    }

    Ok(())
}

/// Reject empty horizons
pub(crate) fn validate_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::ConfigurationError(
            "Forecast horizon must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Half-width of an interval, floored at [`MIN_INTERVAL_HALF_WIDTH`]
pub(crate) fn half_width(critical_value: f64, standard_error: f64) -> f64 {
    (critical_value * standard_error).max(MIN_INTERVAL_HALF_WIDTH)
}

/// Training inputs a fitted model keeps for assembling results
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrainingSnapshot {
    pub(crate) data: TimeSeriesData,
    pub(crate) config: ForecastConfig,
}

impl TrainingSnapshot {
    pub(crate) fn new(data: &TimeSeriesData, config: &ForecastConfig) -> Self {
        Self {
            data: data.clone(),
            config: config.clone(),
        }
    }

    /// Historical timestamps plus `horizon` extrapolated ones
    pub(crate) fn timestamps(&self, horizon: usize) -> Result<ForecastTimestamps> {
        Ok(ForecastTimestamps {
            historical: self.data.timestamps().to_vec(),
            forecast: self.data.future_timestamps(horizon)?,
        })
    }
}

/// A fitted model of any strategy
#[derive(Debug, Clone)]
pub enum TrainedModel {
    /// Fitted moving average
    MovingAverage(TrainedMovingAverage),
    /// Fitted exponential smoothing
    ExponentialSmoothing(TrainedExponentialSmoothing),
    /// Fitted linear trend
    LinearTrend(TrainedLinearTrend),
}

impl TrainedModel {
    /// Fit the strategy named by `config.method`
    pub fn fit(data: &TimeSeriesData, config: &ForecastConfig) -> Result<Self> {
        Self::fit_with(config.method, data, config)
    }

    /// Fit the strategy for `method`, which `config.method` must match
    pub fn fit_with(
        method: ForecastMethod,
        data: &TimeSeriesData,
        config: &ForecastConfig,
    ) -> Result<Self> {
        Ok(match method {
            ForecastMethod::MovingAverage => {
                TrainedModel::MovingAverage(MovingAverageForecaster.fit(data, config)?)
            }
            ForecastMethod::ExponentialSmoothing => {
                TrainedModel::ExponentialSmoothing(ExponentialSmoothingForecaster.fit(data, config)?)
            }
            ForecastMethod::LinearTrend => {
                TrainedModel::LinearTrend(LinearTrendForecaster.fit(data, config)?)
            }
        })
    }

    fn inner(&self) -> &dyn TrainedForecaster {
        match self {
            TrainedModel::MovingAverage(model) => model,
            TrainedModel::ExponentialSmoothing(model) => model,
            TrainedModel::LinearTrend(model) => model,
        }
    }
}

impl TrainedForecaster for TrainedModel {
    fn method(&self) -> ForecastMethod {
        self.inner().method()
    }

    fn fitted_values(&self) -> &[f64] {
        self.inner().fitted_values()
    }

    fn metrics(&self) -> &ForecastMetrics {
        self.inner().metrics()
    }

    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        self.inner().predict(horizon)
    }
}
