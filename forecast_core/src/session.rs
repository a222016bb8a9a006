//! Stateful forecasting session
//!
//! [`ForecastSession`] is the fit-once, predict-many handle for callers that
//! pick a strategy at runtime. It wraps a [`TrainedModel`] that only exists
//! after a successful fit.

use crate::config::{ForecastConfig, ForecastMethod};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, TrainedForecaster, TrainedModel};

/// A forecaster for one method, fitted at most once
#[derive(Debug, Clone)]
pub struct ForecastSession {
    method: ForecastMethod,
    trained: Option<TrainedModel>,
}

impl ForecastSession {
    /// Create an untrained session for `method`
    pub fn new(method: ForecastMethod) -> Self {
        Self {
            method,
            trained: None,
        }
    }

    /// Fit the session's strategy
    ///
    /// The session is left untouched when fitting fails. A trained session
    /// cannot be fitted again; start a new session for another series or
    /// configuration.
    pub fn fit(&mut self, data: &TimeSeriesData, config: &ForecastConfig) -> Result<()> {
        if self.trained.is_some() {
            return Err(ForecastError::ConfigurationError(format!(
                "The {} forecaster is already trained; create a new one to fit again",
                self.method
            )));
        }

        self.trained = Some(TrainedModel::fit_with(self.method, data, config)?);
        Ok(())
    }

    /// Forecast `horizon` periods with the fitted parameters
    pub fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        self.trained
            .as_ref()
            .ok_or(ForecastError::UntrainedModelError)?
            .predict(horizon)
    }

    /// Whether `fit` has succeeded
    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    /// Name of the session's strategy
    pub fn method_name(&self) -> &'static str {
        self.method.as_str()
    }

    /// The session's strategy
    pub fn method(&self) -> ForecastMethod {
        self.method
    }

    /// The fitted model, if any
    pub fn trained_model(&self) -> Option<&TrainedModel> {
        self.trained.as_ref()
    }
}
