//! Export and persistence boundary
//!
//! [`ForecastModel`] is the snapshot handed to storage (JSON) and
//! [`export_rows`] / [`write_csv`] flatten a result into table rows.

use crate::config::{ForecastConfig, ForecastMethod};
use crate::data::TimeSeriesData;
use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Immutable record of a completed forecast
///
/// The result must come from the configured method and from `training_data`:
/// same historical timestamps, no more fitted values than observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredModel")]
pub struct ForecastModel {
    config: ForecastConfig,
    result: ForecastResult,
    trained: bool,
    training_data: TimeSeriesData,
    /// Serialized as an RFC 3339 string
    created_at: DateTime<Utc>,
}

impl ForecastModel {
    /// Snapshot a result together with the inputs that produced it
    ///
    /// Fails with [`ForecastError::ValidationError`] when the parts don't
    /// belong together.
    pub fn new(
        config: ForecastConfig,
        result: ForecastResult,
        training_data: TimeSeriesData,
    ) -> Result<Self> {
        let model = Self {
            config,
            result,
            trained: true,
            training_data,
            created_at: Utc::now(),
        };
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<()> {
        if self.result.method() != self.config.method {
            return Err(ForecastError::ValidationError(format!(
                "Result from {} stored with a {} configuration",
                self.result.method(),
                self.config.method
            )));
        }

        if self.result.timestamps().historical != self.training_data.timestamps() {
            return Err(ForecastError::ValidationError(
                "Result timestamps don't match the training data".to_string(),
            ));
        }

        if self.result.fitted_values().len() > self.training_data.len() {
            return Err(ForecastError::ValidationError(format!(
                "{} fitted values for {} training points",
                self.result.fitted_values().len(),
                self.training_data.len()
            )));
        }

        Ok(())
    }

    /// Load a stored model from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Configuration used for the forecast
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// The forecast itself
    pub fn result(&self) -> &ForecastResult {
        &self.result
    }

    /// Whether the model was trained when the snapshot was taken
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Series the model was fitted on
    pub fn training_data(&self) -> &TimeSeriesData {
        &self.training_data
    }

    /// When the snapshot was taken
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flatten into export rows
    pub fn export_rows(&self) -> Result<Vec<ExportRow>> {
        export_rows(&self.training_data, &self.result)
    }
}

/// Wire form of [`ForecastModel`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredModel {
    config: ForecastConfig,
    result: ForecastResult,
    trained: bool,
    training_data: TimeSeriesData,
    created_at: DateTime<Utc>,
}

impl TryFrom<StoredModel> for ForecastModel {
    type Error = ForecastError;

    fn try_from(stored: StoredModel) -> Result<Self> {
        let model = ForecastModel {
            config: stored.config,
            result: stored.result,
            trained: stored.trained,
            training_data: stored.training_data,
            created_at: stored.created_at,
        };
        model.check()?;
        Ok(model)
    }
}

/// Whether a row describes an observation or a forecast step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Observed value with its in-sample fit
    Historical,
    /// Forecast step with its interval
    Forecast,
}

/// One line of a forecast export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: RowKind,
    pub method: ForecastMethod,
    pub value: Option<f64>,
    pub fitted_value: Option<f64>,
    pub prediction: Option<f64>,
    pub confidence_lower: Option<f64>,
    pub confidence_upper: Option<f64>,
}

/// Flatten the history and the forecast into rows
///
/// Fitted values are aligned to the end of the history, so a moving average
/// leaves `fitted_value` empty for the points before its first full window.
pub fn export_rows(data: &TimeSeriesData, result: &ForecastResult) -> Result<Vec<ExportRow>> {
    let values = data.values();
    let fitted = result.fitted_values();
    if fitted.len() > values.len() || data.timestamps().len() != values.len() {
        return Err(ForecastError::ValidationError(format!(
            "Result with {} fitted values does not belong to a series of {} points",
            fitted.len(),
            values.len()
        )));
    }

    let offset = values.len() - fitted.len();
    let method = result.method();
    let mut rows = Vec::with_capacity(values.len() + result.horizon());

    for (i, (&timestamp, &value)) in data.timestamps().iter().zip(values).enumerate() {
        rows.push(ExportRow {
            timestamp,
            kind: RowKind::Historical,
            method,
            value: Some(value),
            fitted_value: i.checked_sub(offset).map(|j| fitted[j]),
            prediction: None,
            confidence_lower: None,
            confidence_upper: None,
        });
    }

    let intervals = result.confidence_intervals();
    for (i, &timestamp) in result.timestamps().forecast.iter().enumerate() {
        rows.push(ExportRow {
            timestamp,
            kind: RowKind::Forecast,
            method,
            value: None,
            fitted_value: None,
            prediction: result.predictions().get(i).copied(),
            confidence_lower: intervals.lower.get(i).copied(),
            confidence_upper: intervals.upper.get(i).copied(),
        });
    }

    Ok(rows)
}

/// Write rows as CSV with a header line
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
