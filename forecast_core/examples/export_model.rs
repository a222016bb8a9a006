use chrono::{Duration, TimeZone, Utc};
use forecast_core::export::write_csv;
use forecast_core::{
    CriticalValueMethod, ForecastConfig, ForecastMethod, ForecastModel, ForecastSession,
    TimeSeriesData,
};
use std::fs::File;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Core: Export Example");
    println!("=============================\n");

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let values = vec![
        12.0, 14.0, 13.5, 15.0, 16.2, 15.8, 17.1, 18.0, 17.6, 19.2, 20.1, 19.8,
    ];
    let data = TimeSeriesData::from_values(start, Duration::weeks(1), values)?;

    let config = ForecastConfig::new(ForecastMethod::LinearTrend)
        .with_horizon(4)
        .with_confidence_level(0.9)
        .with_critical_values(CriticalValueMethod::Exact);

    let mut session = ForecastSession::new(config.method);
    session.fit(&data, &config)?;
    let forecast = session.predict(config.forecast_horizon)?;

    let model = ForecastModel::new(config, forecast, data)?;
    println!("Model snapshot:\n{}\n", model.to_json_pretty()?);

    let path = std::env::temp_dir().join("forecast_export.csv");
    let rows = model.export_rows()?;
    write_csv(File::create(&path)?, &rows)?;
    println!("Wrote {} rows to {}", rows.len(), path.display());

    Ok(())
}
