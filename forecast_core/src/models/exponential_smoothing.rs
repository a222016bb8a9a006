//! Exponential smoothing models for time series forecasting
//!
//! With only `alpha` configured this is simple exponential smoothing and the
//! forecast is flat at the final level. Adding `beta` switches to Holt's
//! method, which extrapolates the final level along the final trend.

use crate::config::{ForecastConfig, ForecastMethod};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::metrics::ForecastMetrics;
use crate::models::{
    half_width, validate_fit, validate_horizon, ForecastResult, Forecaster, TrainedForecaster,
    TrainingSnapshot,
};
use forecast_math::smoothing::{holt_smoothing, simple_smoothing};
use forecast_math::stats::{population_std_dev, residuals};
use tracing::debug;

/// Which recurrence was fitted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingMode {
    /// Level only
    Simple { alpha: f64 },
    /// Level and trend (Holt's linear trend method)
    Double { alpha: f64, beta: f64 },
}

/// Exponential smoothing forecaster
///
/// Reads `alpha` (required) and `beta` (optional) from the configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialSmoothingForecaster;

/// Trained exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    mode: SmoothingMode,
    /// Smoothed level after each observation
    levels: Vec<f64>,
    /// Final level
    level: f64,
    /// Final trend, zero in simple mode
    trend: f64,
    /// Population standard deviation of the one-step-ahead errors
    residual_std_dev: f64,
    metrics: ForecastMetrics,
    snapshot: TrainingSnapshot,
}

fn smoothing_factor(name: &str, value: f64) -> Result<f64> {
    if !(value > 0.0 && value < 1.0) {
        return Err(ForecastError::ConfigurationError(format!(
            "{} must be between 0 and 1 (exclusive), got {}",
            name, value
        )));
    }
    Ok(value)
}

impl ExponentialSmoothingForecaster {
    fn mode(config: &ForecastConfig) -> Result<SmoothingMode> {
        let alpha = config.parameters.alpha.ok_or_else(|| {
            ForecastError::ConfigurationError(
                "Exponential smoothing requires an alpha parameter".to_string(),
            )
        })?;
        let alpha = smoothing_factor("Alpha", alpha)?;

        Ok(match config.parameters.beta {
            Some(beta) => SmoothingMode::Double {
                alpha,
                beta: smoothing_factor("Beta", beta)?,
            },
            None => SmoothingMode::Simple { alpha },
        })
    }
}

impl Forecaster for ExponentialSmoothingForecaster {
    type Trained = TrainedExponentialSmoothing;

    fn method(&self) -> ForecastMethod {
        ForecastMethod::ExponentialSmoothing
    }

    fn fit(&self, data: &TimeSeriesData, config: &ForecastConfig) -> Result<Self::Trained> {
        validate_fit(data, config, self.method())?;
        let mode = Self::mode(config)?;

        let values = data.values();
        let smoothed = match mode {
            SmoothingMode::Simple { alpha } => simple_smoothing(values, alpha)?,
            SmoothingMode::Double { alpha, beta } => holt_smoothing(values, alpha, beta)?,
        };

        let (level, trend) = match (smoothed.last_level(), smoothed.last_trend()) {
            (Some(level), trend) => (level, trend.unwrap_or(0.0)),
            (None, _) => {
                return Err(ForecastError::ValidationError(
                    "Smoothing produced no level".to_string(),
                ))
            }
        };

        // One-step-ahead errors start at index 1
        let actual = &values[1..];
        let residual_std_dev = population_std_dev(&residuals(actual, &smoothed.one_step_ahead));
        let metrics = ForecastMetrics::evaluate(actual, &smoothed.one_step_ahead);

        debug!(
            points = values.len(),
            ?mode,
            final_level = level,
            final_trend = trend,
            residual_std_dev,
            "fitted exponential smoothing"
        );

        Ok(TrainedExponentialSmoothing {
            mode,
            levels: smoothed.levels,
            level,
            trend,
            residual_std_dev,
            metrics,
            snapshot: TrainingSnapshot::new(data, config),
        })
    }
}

impl TrainedExponentialSmoothing {
    /// Fitted recurrence and its parameters
    pub fn mode(&self) -> SmoothingMode {
        self.mode
    }

    /// Final level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Final trend (zero for simple smoothing)
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Spread of the one-step-ahead errors
    pub fn residual_std_dev(&self) -> f64 {
        self.residual_std_dev
    }
}

impl TrainedForecaster for TrainedExponentialSmoothing {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::ExponentialSmoothing
    }

    fn fitted_values(&self) -> &[f64] {
        &self.levels
    }

    fn metrics(&self) -> &ForecastMetrics {
        &self.metrics
    }

    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        validate_horizon(horizon)?;

        let predictions = (1..=horizon)
            .map(|step| match self.mode {
                SmoothingMode::Simple { .. } => self.level,
                SmoothingMode::Double { .. } => self.level + step as f64 * self.trend,
            })
            .collect();

        // Uncertainty compounds: the width grows with sqrt(step)
        let config = &self.snapshot.config;
        let z = config.critical_values.z(config.confidence_level)?;
        let widths: Vec<f64> = (1..=horizon)
            .map(|step| half_width(z, self.residual_std_dev * (step as f64).sqrt()))
            .collect();

        ForecastResult::new(
            self.method(),
            self.levels.clone(),
            predictions,
            &widths,
            self.metrics.clone(),
            self.snapshot.timestamps(horizon)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;

    fn series(values: &[f64]) -> TimeSeriesData {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        TimeSeriesData::from_values(start, Duration::days(1), values.to_vec()).unwrap()
    }

    fn config() -> ForecastConfig {
        ForecastConfig::new(ForecastMethod::ExponentialSmoothing)
    }

    #[test]
    fn test_simple_smoothing() {
        let data = series(&[10.0, 20.0, 30.0]);
        let model = ExponentialSmoothingForecaster
            .fit(&data, &config().with_alpha(0.5))
            .unwrap();

        assert_eq!(model.fitted_values(), &[10.0, 15.0, 22.5]);
        assert_eq!(model.predict(1).unwrap().predictions(), &[22.5]);
        assert_eq!(model.trend(), 0.0);

        // One-step errors: 20 - 10, 30 - 15
        assert_relative_eq!(model.metrics().mae, 12.5);
        assert_relative_eq!(model.residual_std_dev(), 2.5);
    }

    #[test]
    fn test_interval_widens_with_sqrt_of_step() {
        let data = series(&[10.0, 20.0, 30.0]);
        let model = ExponentialSmoothingForecaster
            .fit(&data, &config().with_alpha(0.5))
            .unwrap();
        let forecast = model.predict(4).unwrap();

        for (i, (lower, upper)) in forecast.intervals().enumerate() {
            let expected = 1.96 * 2.5 * ((i + 1) as f64).sqrt();
            assert_relative_eq!(upper - 22.5, expected, epsilon = 1e-12);
            assert_relative_eq!(22.5 - lower, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_holt_extrapolates_trend() {
        let data = series(&[10.0, 12.0, 15.0, 16.0]);
        let model = ExponentialSmoothingForecaster
            .fit(&data, &config().with_alpha(0.5).with_beta(0.5))
            .unwrap();

        assert_eq!(model.fitted_values(), &[10.0, 12.0, 14.5, 16.375]);
        assert_eq!(model.trend(), 2.0625);
        assert_eq!(
            model.predict(2).unwrap().predictions(),
            &[16.375 + 2.0625, 16.375 + 2.0 * 2.0625]
        );

        // One-step errors: 12 - 12, 15 - 14, 16 - 16.75
        assert_relative_eq!(model.metrics().mae, 1.75 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_alpha_is_required() {
        let data = series(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            ExponentialSmoothingForecaster.fit(&data, &config()),
            Err(ForecastError::ConfigurationError(_))
        ));
    }

    #[rstest]
    #[case(Some(0.0), None)]
    #[case(Some(1.0), None)]
    #[case(Some(-0.2), None)]
    #[case(Some(0.5), Some(0.0))]
    #[case(Some(0.5), Some(1.0))]
    #[case(Some(0.5), Some(f64::NAN))]
    fn test_smoothing_factor_bounds(#[case] alpha: Option<f64>, #[case] beta: Option<f64>) {
        let data = series(&[1.0, 2.0, 3.0]);
        let mut config = config();
        config.parameters.alpha = alpha;
        config.parameters.beta = beta;

        assert!(matches!(
            ExponentialSmoothingForecaster.fit(&data, &config),
            Err(ForecastError::ConfigurationError(_))
        ));
    }
}
