//! # Forecast Kit
//!
//! `forecast_kit` bundles the workspace crates behind one dependency:
//! [`core`] for the forecasting strategies and [`math`] for the numerical
//! building blocks they are made of.
//!
//! ## Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use forecast_kit::prelude::*;
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let values = vec![3.0, 5.0, 7.0, 9.0];
//! let data = TimeSeriesData::from_values(start, Duration::days(1), values).unwrap();
//! let config = ForecastConfig::new(ForecastMethod::LinearTrend).with_horizon(1);
//!
//! let mut session = ForecastSession::new(config.method);
//! session.fit(&data, &config).unwrap();
//! let forecast = session.predict(1).unwrap();
//! assert!((forecast.predictions()[0] - 11.0).abs() < 1e-9);
//! ```

pub use forecast_core as core;
pub use forecast_math as math;

/// The types needed for a typical fit and forecast
pub mod prelude {
    pub use forecast_core::models::{Forecaster, TrainedForecaster};
    pub use forecast_core::{
        CriticalValueMethod, ForecastConfig, ForecastError, ForecastMethod, ForecastModel,
        ForecastResult, ForecastSession, TimeSeriesData, TrainedModel,
    };
}
