//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use crate::utils::{future_timestamps, FutureStep};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Spacing between consecutive observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One observation per day
    Daily,
    /// One observation per week
    Weekly,
    /// One observation per calendar month
    Monthly,
    /// No recognisable regular spacing
    #[default]
    Irregular,
}

impl Frequency {
    /// Classify a typical spacing expressed in days
    fn from_spacing_days(days: f64) -> Self {
        match days {
            d if (d - 1.0).abs() < 0.1 => Frequency::Daily,
            d if (d - 7.0).abs() < 0.5 => Frequency::Weekly,
            d if (28.0..=31.0).contains(&d) => Frequency::Monthly,
            _ => Frequency::Irregular,
        }
    }
}

/// Properties derived from the timestamps of a series
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMetadata {
    /// Inferred observation frequency
    pub frequency: Frequency,
    /// Whether some spacing is clearly larger than the typical one
    pub has_gaps: bool,
    /// Number of observations
    pub total_points: usize,
}

impl SeriesMetadata {
    /// Infer metadata from already-parsed timestamps
    ///
    /// The median spacing decides the frequency; a spacing above 1.5 times
    /// the median counts as a gap.
    pub fn infer(timestamps: &[DateTime<Utc>], total_points: usize) -> Self {
        let mut spacings: Vec<i64> = timestamps
            .windows(2)
            .map(|w| (w[1] - w[0]).num_seconds())
            .collect();

        if spacings.is_empty() {
            return Self {
                frequency: Frequency::Irregular,
                has_gaps: false,
                total_points,
            };
        }

        spacings.sort_unstable();
        let median_spacing = spacings[spacings.len() / 2] as f64;

        let frequency = Frequency::from_spacing_days(median_spacing / SECONDS_PER_DAY);
        let has_gaps = median_spacing > 0.0
            && spacings
                .iter()
                .any(|&spacing| spacing as f64 > 1.5 * median_spacing);

        Self {
            frequency,
            has_gaps,
            total_points,
        }
    }
}

/// Time series data structure for forecasting
///
/// Timestamps and values are parallel sequences. Construction never rejects
/// input; [`TimeSeriesData::validate`] checks the invariants the forecasters
/// rely on, and every `fit` calls it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredSeries")]
pub struct TimeSeriesData {
    /// Observation times
    timestamps: Vec<DateTime<Utc>>,
    /// Observed values
    values: Vec<f64>,
    /// Derived properties of the timestamps
    metadata: SeriesMetadata,
}

impl TimeSeriesData {
    /// Create a new TimeSeriesData from timestamps and values, inferring metadata
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        let metadata = SeriesMetadata::infer(&timestamps, values.len());
        Self {
            timestamps,
            values,
            metadata,
        }
    }

    /// Create a regularly spaced series starting at `start`
    ///
    /// Fails with [`ForecastError::ValidationError`] when a timestamp would
    /// fall outside the representable time range.
    pub fn from_values(start: DateTime<Utc>, step: Duration, values: Vec<f64>) -> Result<Self> {
        let timestamps = (0..values.len())
            .map(|i| {
                i32::try_from(i)
                    .ok()
                    .and_then(|i| step.checked_mul(i))
                    .and_then(|offset| start.checked_add_signed(offset))
                    .ok_or_else(|| {
                        ForecastError::ValidationError(format!(
                            "Timestamp {} is outside the representable time range",
                            i
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(timestamps, values))
    }

    /// Check the invariants required by the forecasters
    ///
    /// Fails with [`ForecastError::ValidationError`] on the first violation:
    /// no data, mismatched lengths, fewer than two points, or a value that is
    /// NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        if self.timestamps.is_empty() || self.values.is_empty() {
            return Err(ForecastError::ValidationError(
                "Time series must contain timestamps and values".to_string(),
            ));
        }

        if self.timestamps.len() != self.values.len() {
            return Err(ForecastError::ValidationError(format!(
                "Timestamps length ({}) doesn't match values length ({})",
                self.timestamps.len(),
                self.values.len()
            )));
        }

        if self.values.len() < 2 {
            return Err(ForecastError::ValidationError(format!(
                "Time series needs at least 2 points, got {}",
                self.values.len()
            )));
        }

        if let Some(index) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::ValidationError(format!(
                "Value at index {} is not finite: {}",
                index, self.values[index]
            )));
        }

        Ok(())
    }

    /// Get the timestamps
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get the values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the derived metadata
    pub fn metadata(&self) -> &SeriesMetadata {
        &self.metadata
    }

    /// Inferred frequency
    pub fn frequency(&self) -> Frequency {
        self.metadata.frequency
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a sub-series from `start` (inclusive) to `end` (exclusive)
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.len() || end > self.timestamps.len() {
            return Err(ForecastError::ValidationError(format!(
                "Slice {}..{} is out of bounds for a series of {} points",
                start,
                end,
                self.len()
            )));
        }

        Ok(Self::new(
            self.timestamps[start..end].to_vec(),
            self.values[start..end].to_vec(),
        ))
    }

    /// Timestamps for the `horizon` periods following the last observation
    ///
    /// Regular series step by their frequency; irregular ones by the mean
    /// historical spacing (one day when that is unknown).
    pub fn future_timestamps(&self, horizon: usize) -> Result<Vec<DateTime<Utc>>> {
        let Some(&last) = self.timestamps.last() else {
            return Err(ForecastError::ValidationError(
                "Cannot extend a series without timestamps".to_string(),
            ));
        };

        let step = match self.metadata.frequency {
            Frequency::Daily => FutureStep::Fixed(Duration::days(1)),
            Frequency::Weekly => FutureStep::Fixed(Duration::weeks(1)),
            Frequency::Monthly => FutureStep::Months(1),
            Frequency::Irregular => FutureStep::Fixed(self.mean_spacing()),
        };

        future_timestamps(last, horizon, step)
    }

    fn mean_spacing(&self) -> Duration {
        let gaps = i32::try_from(self.timestamps.len().saturating_sub(1)).unwrap_or(i32::MAX);
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(&first), Some(&last)) if gaps > 0 && last > first => (last - first) / gaps,
            _ => Duration::days(1),
        }
    }
}

/// Wire form of [`TimeSeriesData`]
///
/// Metadata is derived from the timestamps, so a stored copy must agree with
/// what [`SeriesMetadata::infer`] produces. It may be omitted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
    metadata: Option<SeriesMetadata>,
}

impl TryFrom<StoredSeries> for TimeSeriesData {
    type Error = ForecastError;

    fn try_from(stored: StoredSeries) -> Result<Self> {
        let data = TimeSeriesData::new(stored.timestamps, stored.values);
        match stored.metadata {
            Some(metadata) if metadata != data.metadata => Err(ForecastError::ValidationError(
                format!(
                    "Stored metadata {:?} doesn't match the series ({:?})",
                    metadata, data.metadata
                ),
            )),
            _ => Ok(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_infers_daily_frequency() {
        let data = TimeSeriesData::from_values(day(1), Duration::days(1), vec![1.0; 5]).unwrap();
        assert_eq!(data.frequency(), Frequency::Daily);
        assert!(!data.metadata().has_gaps);
        assert_eq!(data.metadata().total_points, 5);
    }

    #[test]
    fn test_infers_weekly_and_monthly() {
        let weekly = TimeSeriesData::from_values(day(1), Duration::weeks(1), vec![1.0; 4]).unwrap();
        assert_eq!(weekly.frequency(), Frequency::Weekly);

        let monthly = TimeSeriesData::new(
            (1..=4)
                .map(|m| Utc.with_ymd_and_hms(2024, m, 1, 0, 0, 0).unwrap())
                .collect(),
            vec![1.0; 4],
        );
        assert_eq!(monthly.frequency(), Frequency::Monthly);
    }

    #[test]
    fn test_detects_gaps() {
        let data = TimeSeriesData::new(
            vec![day(1), day(2), day(3), day(7), day(8)],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        );
        assert_eq!(data.frequency(), Frequency::Daily);
        assert!(data.metadata().has_gaps);
    }

    #[test]
    fn test_irregular_spacing() {
        let data = TimeSeriesData::new(vec![day(1), day(4), day(8)], vec![1.0, 2.0, 3.0]);
        assert_eq!(data.frequency(), Frequency::Irregular);

        // Mean spacing is 3.5 days
        let future = data.future_timestamps(1).unwrap();
        assert_eq!(future[0], day(11) + Duration::hours(12));
    }

    #[test]
    fn test_validate_order() {
        let empty = TimeSeriesData::new(vec![], vec![]);
        assert!(matches!(empty.validate(), Err(ForecastError::ValidationError(_))));

        let mismatched = TimeSeriesData::new(vec![day(1)], vec![1.0, f64::NAN]);
        let err = mismatched.validate().unwrap_err().to_string();
        assert!(err.contains("doesn't match"));

        let single = TimeSeriesData::new(vec![day(1)], vec![1.0]);
        assert!(single.validate().unwrap_err().to_string().contains("at least 2"));

        let nan = TimeSeriesData::new(vec![day(1), day(2)], vec![1.0, f64::NAN]);
        assert!(nan.validate().unwrap_err().to_string().contains("index 1"));
    }

    #[test]
    fn test_validate_rejects_infinite_values() {
        for bad in [f64::INFINITY, f64::NEG_INFINITY] {
            let data = TimeSeriesData::new(vec![day(1), day(2), day(3)], vec![1.0, 2.0, bad]);
            let err = data.validate().unwrap_err();
            assert!(matches!(err, ForecastError::ValidationError(_)));
            assert!(err.to_string().contains("index 2"));
        }
    }

    #[test]
    fn test_from_values_rejects_out_of_range_timestamps() {
        // Third point lands beyond year 262143
        let result = TimeSeriesData::from_values(day(1), Duration::days(50_000_000), vec![1.0; 3]);
        assert!(matches!(result, Err(ForecastError::ValidationError(_))));

        let result =
            TimeSeriesData::from_values(DateTime::<Utc>::MAX_UTC, Duration::days(1), vec![1.0; 2]);
        assert!(matches!(result, Err(ForecastError::ValidationError(_))));
    }

    #[test]
    fn test_deserialize_recomputes_and_checks_metadata() {
        let json = r#"{"timestamps":["2024-01-01T00:00:00Z","2024-01-02T00:00:00Z"],"values":[1.0,2.0]}"#;
        let data: TimeSeriesData = serde_json::from_str(json).unwrap();
        assert_eq!(data.frequency(), Frequency::Daily);
        assert_eq!(data.metadata().total_points, 2);

        let stale = r#"{
            "timestamps": ["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"],
            "values": [1.0, 2.0],
            "metadata": {"frequency": "weekly", "hasGaps": false, "totalPoints": 7}
        }"#;
        assert!(serde_json::from_str::<TimeSeriesData>(stale).is_err());
    }

    #[test]
    fn test_slice_recomputes_metadata() {
        let data = TimeSeriesData::from_values(day(1), Duration::days(1), vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let subset = data.slice(1, 3).unwrap();

        assert_eq!(subset.values(), &[2.0, 3.0]);
        assert_eq!(subset.timestamps()[0], day(2));
        assert_eq!(subset.metadata().total_points, 2);
        assert!(data.slice(3, 5).is_err());
    }
}
