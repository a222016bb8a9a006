//! Linear trend forecasting
//!
//! Fits an ordinary least-squares line over the series index and extrapolates
//! it. Intervals are OLS prediction intervals: they account for residual noise
//! and widen with the distance from the centre of the training index.

use crate::config::{ForecastConfig, ForecastMethod};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::metrics::ForecastMetrics;
use crate::models::{
    half_width, validate_fit, validate_horizon, ForecastResult, Forecaster, TrainedForecaster,
    TrainingSnapshot,
};
use forecast_math::IndexRegression;
use tracing::{debug, warn};

/// Least-squares trend forecaster
///
/// `polynomialDegree` is accepted for any value of at least 1, but the fit is
/// always a straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrendForecaster;

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    regression: IndexRegression,
    fitted_values: Vec<f64>,
    metrics: ForecastMetrics,
    snapshot: TrainingSnapshot,
}

impl Forecaster for LinearTrendForecaster {
    type Trained = TrainedLinearTrend;

    fn method(&self) -> ForecastMethod {
        ForecastMethod::LinearTrend
    }

    fn fit(&self, data: &TimeSeriesData, config: &ForecastConfig) -> Result<Self::Trained> {
        validate_fit(data, config, self.method())?;

        let degree = config.parameters.polynomial_degree.unwrap_or(1);
        if degree == 0 {
            return Err(ForecastError::ConfigurationError(
                "Polynomial degree must be at least 1".to_string(),
            ));
        }
        if degree > 1 {
            warn!(degree, "polynomial trends are not supported, fitting a straight line");
        }

        let values = data.values();
        let regression = IndexRegression::fit(values)?;
        let fitted_values = regression.fitted_values();
        let metrics = ForecastMetrics::evaluate(values, &fitted_values);

        debug!(
            points = values.len(),
            slope = regression.slope(),
            intercept = regression.intercept(),
            r2 = regression.r_squared(),
            "fitted linear trend"
        );

        Ok(TrainedLinearTrend {
            regression,
            fitted_values,
            metrics,
            snapshot: TrainingSnapshot::new(data, config),
        })
    }
}

impl TrainedLinearTrend {
    /// Trend per period
    pub fn slope(&self) -> f64 {
        self.regression.slope()
    }

    /// Value of the trend line at the first observation
    pub fn intercept(&self) -> f64 {
        self.regression.intercept()
    }

    /// Coefficient of determination of the fit
    pub fn r_squared(&self) -> f64 {
        self.regression.r_squared()
    }

    /// Residual standard error of the fit
    pub fn residual_standard_error(&self) -> f64 {
        self.regression.residual_standard_error()
    }
}

impl TrainedForecaster for TrainedLinearTrend {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::LinearTrend
    }

    fn fitted_values(&self) -> &[f64] {
        &self.fitted_values
    }

    fn metrics(&self) -> &ForecastMetrics {
        &self.metrics
    }

    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        validate_horizon(horizon)?;

        let config = &self.snapshot.config;
        let t = config
            .critical_values
            .t(config.confidence_level, self.regression.degrees_of_freedom())?;

        let n = self.regression.len();
        let mut predictions = Vec::with_capacity(horizon);
        let mut widths = Vec::with_capacity(horizon);

        for step in 1..=horizon {
            let x = (n + step - 1) as f64;
            predictions.push(self.regression.predict(x));
            widths.push(half_width(t, self.regression.prediction_standard_error(x)));
        }

        ForecastResult::new(
            self.method(),
            self.fitted_values.clone(),
            predictions,
            &widths,
            self.metrics.clone(),
            self.snapshot.timestamps(horizon)?,
        )
    }
}
