//! Utility functions for the forecast_core crate

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, Months, Utc};

/// How far apart consecutive future timestamps are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureStep {
    /// A fixed duration
    Fixed(Duration),
    /// A number of calendar months (day of month clamped at month end)
    Months(u32),
}

/// Create future timestamps following `last_timestamp`
pub fn future_timestamps(
    last_timestamp: DateTime<Utc>,
    horizon: usize,
    step: FutureStep,
) -> Result<Vec<DateTime<Utc>>> {
    (1..=horizon)
        .map(|i| {
            let next = match step {
                FutureStep::Fixed(duration) => i32::try_from(i)
                    .ok()
                    .and_then(|i| duration.checked_mul(i))
                    .and_then(|offset| last_timestamp.checked_add_signed(offset)),
                FutureStep::Months(months) => u32::try_from(i)
                    .ok()
                    .and_then(|i| months.checked_mul(i))
                    .and_then(|offset| last_timestamp.checked_add_months(Months::new(offset))),
            };
            next.ok_or_else(|| {
                ForecastError::ValidationError(format!(
                    "Forecast step {} is outside the representable time range",
                    i
                ))
            })
        })
        .collect()
}

/// Number of leading points that form the training part of a split
///
/// `train_ratio` is the fraction of the series used for training.
pub fn train_size(len: usize, train_ratio: f64) -> usize {
    ((len as f64 * train_ratio).round() as usize).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_future_daily_timestamps() {
        let last = Utc.with_ymd_and_hms(2024, 2, 27, 0, 0, 0).unwrap();
        let future = future_timestamps(last, 3, FutureStep::Fixed(Duration::days(1))).unwrap();

        assert_eq!(
            future,
            vec![
                Utc.with_ymd_and_hms(2024, 2, 28, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_future_monthly_timestamps_clamp_to_month_end() {
        let last = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let future = future_timestamps(last, 2, FutureStep::Months(1)).unwrap();

        assert_eq!(future[0], Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert_eq!(future[1], Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_zero_horizon_is_empty() {
        let last = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(future_timestamps(last, 0, FutureStep::Months(1)).unwrap().is_empty());
    }

    #[test]
    fn test_train_size() {
        assert_eq!(train_size(10, 0.8), 8);
        assert_eq!(train_size(5, 0.5), 3);
        assert_eq!(train_size(5, 0.0), 0);
        assert_eq!(train_size(5, 1.0), 5);
    }
}
