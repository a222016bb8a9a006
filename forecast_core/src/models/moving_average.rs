//! Moving average forecasting
//!
//! The fit is the trailing mean of every full window; the forecast repeats
//! the last of those means for every future step.

use crate::config::{ForecastConfig, ForecastMethod, DEFAULT_WINDOW_SIZE};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::metrics::ForecastMetrics;
use crate::models::{
    half_width, validate_fit, validate_horizon, ForecastResult, Forecaster, TrainedForecaster,
    TrainingSnapshot,
};
use forecast_math::moving_averages::trailing_means;
use forecast_math::stats::{population_std_dev, residuals};
use tracing::debug;

/// Simple Moving Average forecaster
///
/// Reads `windowSize` from the configuration (default 3).
#[derive(Debug, Clone, Copy, Default)]
pub struct MovingAverageForecaster;

/// Trained Simple Moving Average model
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    /// Window size
    window_size: usize,
    /// Trailing means, one per full window
    moving_averages: Vec<f64>,
    /// Last calculated average
    last_average: f64,
    /// Population standard deviation of `actual - average`
    residual_std_dev: f64,
    /// Accuracy over the fitted range
    metrics: ForecastMetrics,
    snapshot: TrainingSnapshot,
}

impl Forecaster for MovingAverageForecaster {
    type Trained = TrainedMovingAverage;

    fn method(&self) -> ForecastMethod {
        ForecastMethod::MovingAverage
    }

    fn fit(&self, data: &TimeSeriesData, config: &ForecastConfig) -> Result<Self::Trained> {
        validate_fit(data, config, self.method())?;

        let values = data.values();
        let window_size = config.parameters.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
        if window_size == 0 || window_size > values.len() {
            return Err(ForecastError::ConfigurationError(format!(
                "Window size must be between 1 and the series length ({}), got {}",
                values.len(),
                window_size
            )));
        }

        let moving_averages = trailing_means(values, window_size)?;
        let last_average = match moving_averages.last() {
            Some(&average) => average,
            None => {
                return Err(ForecastError::ValidationError(
                    "No complete window in the series".to_string(),
                ))
            }
        };

        // The first window - 1 points have no average to compare against
        let actual = &values[window_size - 1..];
        let residual_std_dev = population_std_dev(&residuals(actual, &moving_averages));
        let metrics = ForecastMetrics::evaluate(actual, &moving_averages);

        debug!(
            points = values.len(),
            window_size,
            last_average,
            residual_std_dev,
            "fitted moving average"
        );

        Ok(TrainedMovingAverage {
            window_size,
            moving_averages,
            last_average,
            residual_std_dev,
            metrics,
            snapshot: TrainingSnapshot::new(data, config),
        })
    }
}

impl TrainedMovingAverage {
    /// Get the window size
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Last calculated average, the value every forecast step repeats
    pub fn last_average(&self) -> f64 {
        self.last_average
    }

    /// Spread of the in-sample residuals
    pub fn residual_std_dev(&self) -> f64 {
        self.residual_std_dev
    }
}

impl TrainedForecaster for TrainedMovingAverage {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::MovingAverage
    }

    fn fitted_values(&self) -> &[f64] {
        &self.moving_averages
    }

    fn metrics(&self) -> &ForecastMetrics {
        &self.metrics
    }

    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        validate_horizon(horizon)?;

        let config = &self.snapshot.config;
        let z = config.critical_values.z(config.confidence_level)?;
        // Constant width: the flat forecast does not compound uncertainty
        let width = half_width(z, self.residual_std_dev);

        ForecastResult::new(
            self.method(),
            self.moving_averages.clone(),
            vec![self.last_average; horizon],
            &vec![width; horizon],
            self.metrics.clone(),
            self.snapshot.timestamps(horizon)?,
        )
    }
}
