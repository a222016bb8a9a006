//! # Forecast Core
//!
//! Time series forecasting strategies behind one contract.
//!
//! ## Features
//!
//! - Validated time series and configuration value objects
//! - Forecasting strategies (Moving Average, Exponential Smoothing, Linear Trend)
//! - Prediction intervals from approximate or exact critical values
//! - Accuracy metrics (MAE, RMSE, MAPE, R²) and holdout evaluation
//! - JSON snapshots and CSV export of results
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use forecast_core::models::{Forecaster, LinearTrendForecaster, TrainedForecaster};
//! use forecast_core::{ForecastConfig, ForecastMethod, ForecastModel, TimeSeriesData};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let data = TimeSeriesData::from_values(start, Duration::days(1), vec![1.0, 2.0, 3.0, 4.0, 5.0])?;
//! let config = ForecastConfig::new(ForecastMethod::LinearTrend).with_horizon(2);
//!
//! let trained = LinearTrendForecaster.fit(&data, &config)?;
//! let forecast = trained.predict(config.forecast_horizon)?;
//! assert_eq!(forecast.predictions(), &[6.0, 7.0]);
//!
//! let model = ForecastModel::new(config, forecast, data)?;
//! let json = model.to_json()?;
//! assert!(json.contains("createdAt"));
//! # Ok::<(), forecast_core::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ForecastConfig, ForecastMethod, ForecastParameters};
pub use crate::data::{Frequency, SeriesMetadata, TimeSeriesData};
pub use crate::error::{ForecastError, Result};
pub use crate::export::{ExportRow, ForecastModel, RowKind};
pub use crate::metrics::{evaluate_holdout, ForecastMetrics, HoldoutReport};
pub use crate::models::{
    Forecaster, ForecastResult, TrainedForecaster, TrainedModel, MIN_INTERVAL_HALF_WIDTH,
};
pub use crate::session::ForecastSession;
pub use forecast_math::CriticalValueMethod;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
