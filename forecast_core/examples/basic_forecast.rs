use chrono::{Duration, TimeZone, Utc};
use forecast_core::models::{
    ExponentialSmoothingForecaster, Forecaster, LinearTrendForecaster, MovingAverageForecaster,
};
use forecast_core::{evaluate_holdout, ForecastConfig, ForecastMethod, ForecastSession, TimeSeriesData};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Core: Basic Forecasting Example");
    println!("========================================\n");

    // Create sample data
    println!("Creating sample data...");
    let data = create_sample_daily_data()?;
    println!(
        "Sample data created: {} points, frequency {:?}\n",
        data.len(),
        data.frequency()
    );

    // Fit every method on the same series
    for method in ForecastMethod::ALL {
        let config = config_for(method);
        let mut session = ForecastSession::new(method);
        session.fit(&data, &config)?;
        let forecast = session.predict(config.forecast_horizon)?;

        println!("{} forecast ({} days):", session.method_name(), forecast.horizon());
        for ((timestamp, value), (lower, upper)) in forecast
            .timestamps()
            .forecast
            .iter()
            .zip(forecast.predictions())
            .zip(forecast.intervals())
        {
            println!(
                "  {}: {:.2} ({:.2}, {:.2})",
                timestamp.format("%Y-%m-%d"),
                value,
                lower,
                upper
            );
        }
        println!("  In-sample accuracy: {}\n", forecast.metrics());
    }

    // Compare methods on a holdout split
    println!("Holdout comparison (80/20 split):");
    let ma = evaluate_holdout(
        &MovingAverageForecaster,
        &data,
        &config_for(ForecastMethod::MovingAverage),
    )?;
    print_holdout(MovingAverageForecaster.method_name(), &ma);

    let es = evaluate_holdout(
        &ExponentialSmoothingForecaster,
        &data,
        &config_for(ForecastMethod::ExponentialSmoothing),
    )?;
    print_holdout(ExponentialSmoothingForecaster.method_name(), &es);

    let lt = evaluate_holdout(
        &LinearTrendForecaster,
        &data,
        &config_for(ForecastMethod::LinearTrend),
    )?;
    print_holdout(LinearTrendForecaster.method_name(), &lt);

    println!("\nForecasting complete!");
    Ok(())
}

fn config_for(method: ForecastMethod) -> ForecastConfig {
    let config = ForecastConfig::new(method).with_horizon(5);
    match method {
        ForecastMethod::MovingAverage => config.with_window_size(5),
        ForecastMethod::ExponentialSmoothing => config.with_alpha(0.4).with_beta(0.2),
        ForecastMethod::LinearTrend => config,
    }
}

fn print_holdout(name: &str, report: &forecast_core::HoldoutReport) {
    println!(
        "  {:<24} train {:>3}, test {:>3}, {}",
        name, report.train_points, report.test_points, report.metrics
    );
}

// Helper function to create sample daily data with a trend and a weekly cycle
fn create_sample_daily_data() -> forecast_core::Result<TimeSeriesData> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let values = (0..60)
        .map(|day| {
            let trend = 100.0 + 0.5 * day as f64;
            let weekly = 3.0 * (day as f64 * std::f64::consts::TAU / 7.0).sin();
            trend + weekly
        })
        .collect();

    TimeSeriesData::from_values(start, Duration::days(1), values)
}
