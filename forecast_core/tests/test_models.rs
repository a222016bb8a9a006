use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use forecast_core::models::{
    ExponentialSmoothingForecaster, LinearTrendForecaster, MovingAverageForecaster,
};
use forecast_core::{
    ForecastConfig, ForecastError, ForecastMethod, ForecastResult, Forecaster, TimeSeriesData,
    TrainedForecaster, TrainedModel,
};
use forecast_math::MathError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rstest::rstest;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
}

fn create_test_data(values: &[f64]) -> TimeSeriesData {
    TimeSeriesData::from_values(start(), Duration::days(1), values.to_vec()).unwrap()
}

fn noisy_trend(len: usize, seed: u64) -> TimeSeriesData {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 3.0).unwrap();
    let values = (0..len)
        .map(|i| 100.0 + 0.5 * i as f64 + noise.sample(&mut rng))
        .collect::<Vec<f64>>();
    create_test_data(&values)
}

fn config_for(method: ForecastMethod) -> ForecastConfig {
    let config = ForecastConfig::new(method).with_horizon(6);
    match method {
        ForecastMethod::MovingAverage => config.with_window_size(4),
        ForecastMethod::ExponentialSmoothing => config.with_alpha(0.4).with_beta(0.2),
        ForecastMethod::LinearTrend => config,
    }
}

fn assert_result_invariants(result: &ForecastResult, horizon: usize) {
    let intervals = result.confidence_intervals();
    assert_eq!(result.predictions().len(), horizon);
    assert_eq!(intervals.lower.len(), horizon);
    assert_eq!(intervals.upper.len(), horizon);
    assert_eq!(result.timestamps().forecast.len(), horizon);

    for (i, &prediction) in result.predictions().iter().enumerate() {
        assert!(intervals.lower[i] <= prediction, "lower bound above prediction at {}", i);
        assert!(prediction <= intervals.upper[i], "upper bound below prediction at {}", i);
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage, 40 - 4 + 1)]
#[case(ForecastMethod::ExponentialSmoothing, 40)]
#[case(ForecastMethod::LinearTrend, 40)]
fn test_result_shapes(#[case] method: ForecastMethod, #[case] fitted_len: usize) {
    let data = noisy_trend(40, 7);
    let config = config_for(method);
    let model = TrainedModel::fit(&data, &config).unwrap();

    for horizon in [1, 6, 25] {
        let result = model.predict(horizon).unwrap();
        assert_eq!(result.method(), method);
        assert_eq!(result.fitted_values().len(), fitted_len);
        assert_eq!(result.timestamps().historical.len(), 40);
        assert_result_invariants(&result, horizon);
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::LinearTrend)]
fn test_intervals_bracket_predictions_on_random_series(#[case] method: ForecastMethod) {
    for seed in 0..20 {
        let data = noisy_trend(12 + seed as usize, seed);
        for level in [0.0, 0.5, 0.8, 0.9, 0.95, 0.99, 1.0] {
            let config = config_for(method).with_confidence_level(level);
            let model = TrainedModel::fit(&data, &config).unwrap();
            assert_result_invariants(&model.predict(8).unwrap(), 8);
        }
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::LinearTrend)]
fn test_predict_is_idempotent(#[case] method: ForecastMethod) {
    let data = noisy_trend(30, 42);
    let model = TrainedModel::fit(&data, &config_for(method)).unwrap();

    assert_eq!(model.predict(5).unwrap(), model.predict(5).unwrap());
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::LinearTrend)]
fn test_malformed_series_fail_validation_first(#[case] method: ForecastMethod) {
    // Even with an invalid config, the data check comes first
    let config = config_for(method).with_horizon(0);

    let empty = TimeSeriesData::new(vec![], vec![]);
    let single = create_test_data(&[1.0]);
    let with_nan = create_test_data(&[1.0, f64::NAN, 3.0]);
    let mismatched = TimeSeriesData::new(vec![start()], vec![1.0, 2.0]);

    for data in [empty, single, with_nan, mismatched] {
        assert!(matches!(
            TrainedModel::fit(&data, &config),
            Err(ForecastError::ValidationError(_))
        ));
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::LinearTrend)]
fn test_infinite_values_fail_validation(#[case] method: ForecastMethod) {
    let config = config_for(method);
    for bad in [f64::INFINITY, f64::NEG_INFINITY] {
        let data = create_test_data(&[1.0, bad, 3.0, 4.0, 5.0]);
        let err = TrainedModel::fit(&data, &config).unwrap_err();
        assert!(matches!(err, ForecastError::ValidationError(_)));
        assert!(err.to_string().contains("index 1"));
    }
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::ExponentialSmoothing)]
#[case(ForecastMethod::LinearTrend)]
fn test_huge_constant_series_forecasts_finite_values(#[case] method: ForecastMethod) {
    let value = f64::MAX / 2.0;
    let data = create_test_data(&[value; 6]);
    let model = TrainedModel::fit(&data, &config_for(method)).unwrap();
    let result = model.predict(3).unwrap();

    assert_eq!(result.predictions(), &[value; 3]);
    assert_result_invariants(&result, 3);
}

#[rstest]
#[case(ForecastMethod::MovingAverage)]
#[case(ForecastMethod::LinearTrend)]
fn test_overflowing_series_is_a_calculation_error(#[case] method: ForecastMethod) {
    // Squared errors of this size exceed f64::MAX
    let big = f64::MAX / 2.0;
    let data = create_test_data(&[big, -big, big, -big, big, -big]);
    let model = TrainedModel::fit(&data, &config_for(method)).unwrap();

    assert!(matches!(
        model.predict(2),
        Err(ForecastError::MathError(MathError::CalculationError(_)))
    ));
}

#[test]
fn test_method_consistency() {
    let data = create_test_data(&[1.0, 2.0, 3.0]);
    let config = ForecastConfig::new(ForecastMethod::LinearTrend);

    assert!(matches!(
        MovingAverageForecaster.fit(&data, &config),
        Err(ForecastError::ConfigurationError(_))
    ));
    assert!(matches!(
        ExponentialSmoothingForecaster.fit(&data, &config.clone().with_alpha(0.5)),
        Err(ForecastError::ConfigurationError(_))
    ));
    assert!(LinearTrendForecaster.fit(&data, &config).is_ok());
}

#[test]
fn test_zero_horizon_is_rejected() {
    let data = create_test_data(&[1.0, 2.0, 3.0]);
    let model = LinearTrendForecaster
        .fit(&data, &ForecastConfig::new(ForecastMethod::LinearTrend))
        .unwrap();

    assert!(matches!(
        model.predict(0),
        Err(ForecastError::ConfigurationError(_))
    ));
}

#[test]
fn test_moving_average_window_limits() {
    let data = create_test_data(&[1.0, 1.0, 2.0, 2.0, 8.0, 8.0]);
    let config = ForecastConfig::new(ForecastMethod::MovingAverage);

    let full = MovingAverageForecaster
        .fit(&data, &config.clone().with_window_size(6))
        .unwrap();
    assert_eq!(full.fitted_values().len(), 1);
    assert_relative_eq!(full.fitted_values()[0], 22.0 / 6.0, epsilon = 1e-12);

    assert!(matches!(
        MovingAverageForecaster.fit(&data, &config.with_window_size(7)),
        Err(ForecastError::ConfigurationError(_))
    ));
}

#[test]
fn test_forecast_timestamps_continue_series() {
    let data = create_test_data(&[10.0, 20.0, 30.0]);
    let config = ForecastConfig::new(ForecastMethod::ExponentialSmoothing).with_alpha(0.5);
    let result = ExponentialSmoothingForecaster
        .fit(&data, &config)
        .unwrap()
        .predict(2)
        .unwrap();

    assert_eq!(
        result.timestamps().forecast,
        vec![start() + Duration::days(3), start() + Duration::days(4)]
    );
}

#[test]
fn test_method_names() {
    assert_eq!(MovingAverageForecaster.method_name(), "moving_average");
    assert_eq!(ExponentialSmoothingForecaster.method_name(), "exponential_smoothing");
    assert_eq!(LinearTrendForecaster.method_name(), "linear_trend");
}
