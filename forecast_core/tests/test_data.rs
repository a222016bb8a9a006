use chrono::{Duration, TimeZone, Utc};
use forecast_core::{Frequency, TimeSeriesData};
use pretty_assertions::assert_eq;

#[test]
fn test_time_series_data_operations() {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let data =
        TimeSeriesData::from_values(start, Duration::days(1), vec![100.0, 103.0, 106.0]).unwrap();

    assert_eq!(data.len(), 3);
    assert!(!data.is_empty());
    assert!(data.validate().is_ok());
    assert_eq!(data.frequency(), Frequency::Daily);

    let subset = data.slice(1, 3).unwrap();
    assert_eq!(subset.len(), 2);
    assert_eq!(subset.values(), &[103.0, 106.0]);
}

#[test]
fn test_weekly_series_extends_by_weeks() {
    let start = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();
    let data =
        TimeSeriesData::from_values(start, Duration::weeks(1), vec![1.0, 2.0, 3.0]).unwrap();

    assert_eq!(data.frequency(), Frequency::Weekly);
    assert_eq!(
        data.future_timestamps(2).unwrap(),
        vec![start + Duration::weeks(3), start + Duration::weeks(4)]
    );
}

#[test]
fn test_json_shape() {
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let data = TimeSeriesData::from_values(start, Duration::days(1), vec![1.0, 2.0]).unwrap();

    let json: serde_json::Value = serde_json::to_value(&data).unwrap();
    assert_eq!(json["metadata"]["frequency"], "daily");
    assert_eq!(json["metadata"]["hasGaps"], false);
    assert_eq!(json["metadata"]["totalPoints"], 2);
    assert_eq!(json["timestamps"][0], "2023-01-01T00:00:00Z");

    let restored: TimeSeriesData = serde_json::from_value(json).unwrap();
    assert_eq!(restored, data);
}
