//! Metrics for evaluating forecast performance

use crate::config::ForecastConfig;
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, TrainedForecaster};
use crate::utils::train_size;
use forecast_math::metrics::{
    mean_absolute_error, mean_absolute_percentage_error, r_squared, root_mean_squared_error,
    zero_actuals,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, in percent, over non-zero actuals
    pub mape: f64,
    /// Coefficient of determination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2: Option<f64>,
}

impl ForecastMetrics {
    /// Compute all metrics over aligned `(actual, fitted)` pairs
    ///
    /// R² is left out when there are no pairs to compare.
    pub fn evaluate(actual: &[f64], fitted: &[f64]) -> Self {
        let skipped = zero_actuals(actual);
        if skipped > 0 {
            warn!(
                skipped,
                total = actual.len(),
                "zero actual values excluded from MAPE"
            );
        }

        let r2 = if actual.is_empty() || actual.len() != fitted.len() {
            None
        } else {
            Some(r_squared(actual, fitted))
        };

        Self {
            mae: mean_absolute_error(actual, fitted),
            rmse: root_mean_squared_error(actual, fitted),
            mape: mean_absolute_percentage_error(actual, fitted),
            r2,
        }
    }

    /// Whether every metric is a finite number
    pub fn is_finite(&self) -> bool {
        self.mae.is_finite()
            && self.rmse.is_finite()
            && self.mape.is_finite()
            && self.r2.map_or(true, f64::is_finite)
    }
}

impl std::fmt::Display for ForecastMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Performance Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        match self.r2 {
            Some(r2) => writeln!(f, "  R²:    {:.4}", r2)?,
            None => writeln!(f, "  R²:    n/a")?,
        }
        Ok(())
    }
}

/// Out-of-sample accuracy from a single train/test split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldoutReport {
    /// Points used for fitting
    pub train_points: usize,
    /// Points held out and forecast
    pub test_points: usize,
    /// Forecast predictions for the held-out points
    pub predictions: Vec<f64>,
    /// Accuracy of the predictions against the held-out actuals
    pub metrics: ForecastMetrics,
}

/// Evaluate a forecaster on a training and test split of `data`
///
/// The first `round(N * trainTestSplit)` points train the model, which then
/// forecasts the remaining points. Both parts must be non-empty and the
/// training part needs at least two points.
pub fn evaluate_holdout<F: Forecaster>(
    forecaster: &F,
    data: &TimeSeriesData,
    config: &ForecastConfig,
) -> Result<HoldoutReport> {
    data.validate()?;
    config.validate()?;

    let train_points = train_size(data.len(), config.train_test_split);
    let test_points = data.len() - train_points;

    if train_points < 2 || test_points == 0 {
        return Err(ForecastError::ValidationError(format!(
            "Split {} of {} points leaves {} training and {} test points",
            config.train_test_split,
            data.len(),
            train_points,
            test_points
        )));
    }

    let train = data.slice(0, train_points)?;
    let test = data.slice(train_points, data.len())?;

    let trained = forecaster.fit(&train, config)?;
    let forecast = trained.predict(test_points)?;
    let metrics = ForecastMetrics::evaluate(test.values(), forecast.predictions());

    debug!(
        method = %forecaster.method(),
        train_points,
        test_points,
        mae = metrics.mae,
        "holdout evaluation complete"
    );

    Ok(HoldoutReport {
        train_points,
        test_points,
        predictions: forecast.predictions().to_vec(),
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_evaluate() {
        let metrics = ForecastMetrics::evaluate(&[2.0, 4.0, 6.0], &[3.0, 4.0, 5.0]);

        assert_relative_eq!(metrics.mae, 2.0 / 3.0);
        assert_relative_eq!(metrics.rmse, (2.0_f64 / 3.0).sqrt());
        // (50% + 0% + 16.67%) / 3
        assert_relative_eq!(metrics.mape, (0.5 + 1.0 / 6.0) / 3.0 * 100.0, epsilon = 1e-9);
        // RSS = 2, TSS = 8
        assert_relative_eq!(metrics.r2.unwrap(), 0.75);
    }

    #[test]
    fn test_evaluate_without_pairs() {
        let metrics = ForecastMetrics::evaluate(&[], &[]);
        assert!(metrics.r2.is_none());
        assert!(metrics.mae.is_nan());
        assert!(!metrics.is_finite());
    }

    #[test]
    fn test_overflowing_errors_are_not_finite() {
        let big = f64::MAX / 2.0;
        let metrics = ForecastMetrics::evaluate(&[big, -big], &[-big, big]);
        assert!(metrics.rmse.is_infinite());
        assert!(!metrics.is_finite());

        assert!(ForecastMetrics::evaluate(&[1.0, 2.0], &[1.5, 2.5]).is_finite());
    }

    #[test]
    fn test_display() {
        let metrics = ForecastMetrics {
            mae: 1.0,
            rmse: 2.0,
            mape: 3.0,
            r2: None,
        };
        let text = metrics.to_string();
        assert!(text.contains("MAE:   1.0000"));
        assert!(text.contains("n/a"));
    }
}
