//! Forecast accuracy metrics
//!
//! All functions take `(actual, fitted)` pairs and never fail: mismatched or
//! empty inputs yield `NaN`, and degenerate inputs propagate through the
//! arithmetic. Callers are expected to validate beforehand.

use crate::stats::mean;

fn paired<'a>(actual: &'a [f64], fitted: &'a [f64]) -> Option<impl Iterator<Item = (f64, f64)> + 'a> {
    if actual.is_empty() || actual.len() != fitted.len() {
        return None;
    }
    Some(actual.iter().copied().zip(fitted.iter().copied()))
}

/// Mean Absolute Error
pub fn mean_absolute_error(actual: &[f64], fitted: &[f64]) -> f64 {
    match paired(actual, fitted) {
        Some(pairs) => pairs.map(|(a, f)| (a - f).abs()).sum::<f64>() / actual.len() as f64,
        None => f64::NAN,
    }
}

/// Mean Squared Error
pub fn mean_squared_error(actual: &[f64], fitted: &[f64]) -> f64 {
    match paired(actual, fitted) {
        Some(pairs) => pairs.map(|(a, f)| (a - f).powi(2)).sum::<f64>() / actual.len() as f64,
        None => f64::NAN,
    }
}

/// Root Mean Squared Error
pub fn root_mean_squared_error(actual: &[f64], fitted: &[f64]) -> f64 {
    mean_squared_error(actual, fitted).sqrt()
}

/// Mean Absolute Percentage Error, in percent
///
/// Points whose actual value is exactly zero have no defined percentage error
/// and are left out of both the sum and the count. When every actual is zero
/// the result is `0.0`.
pub fn mean_absolute_percentage_error(actual: &[f64], fitted: &[f64]) -> f64 {
    let Some(pairs) = paired(actual, fitted) else {
        return f64::NAN;
    };

    let (sum, count) = pairs
        .filter(|(a, _)| *a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, f)| {
            (sum + (a - f).abs() / a.abs(), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum / count as f64 * 100.0
    }
}

/// Number of actual values MAPE has to skip because they are zero
pub fn zero_actuals(actual: &[f64]) -> usize {
    actual.iter().filter(|&&a| a == 0.0).count()
}

/// Coefficient of determination, `1 - RSS / TSS`
///
/// A constant actual series (TSS of zero) is defined to have an R² of 1.
pub fn r_squared(actual: &[f64], fitted: &[f64]) -> f64 {
    let Some(pairs) = paired(actual, fitted) else {
        return f64::NAN;
    };

    let actual_mean = mean(actual);
    let (rss, tss) = pairs.fold((0.0, 0.0), |(rss, tss), (a, f)| {
        (rss + (a - f).powi(2), tss + (a - actual_mean).powi(2))
    });

    if tss == 0.0 {
        1.0
    } else {
        1.0 - rss / tss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_regression_metrics() {
        let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let fitted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

        assert_relative_eq!(mean_absolute_error(&actual, &fitted), 2.4);
        assert_relative_eq!(mean_squared_error(&actual, &fitted), 6.0);
        assert_relative_eq!(root_mean_squared_error(&actual, &fitted), 6.0_f64.sqrt());

        // (0.2 + 0.1 + 0.1 + 0.075 + 0.04) / 5 * 100
        assert_relative_eq!(
            mean_absolute_percentage_error(&actual, &fitted),
            10.3,
            epsilon = 1e-9
        );

        // RSS = 30, TSS = 1000
        assert_relative_eq!(r_squared(&actual, &fitted), 0.97, epsilon = 1e-12);
    }

    #[test]
    fn test_mape_skips_zero_actuals() {
        let actual = [0.0, 10.0, 20.0];
        let fitted = [5.0, 11.0, 18.0];

        assert_eq!(zero_actuals(&actual), 1);
        // Only the 10% and 10% errors count
        assert_relative_eq!(mean_absolute_percentage_error(&actual, &fitted), 10.0);
        assert_eq!(mean_absolute_percentage_error(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_r_squared_constant_series() {
        assert_eq!(r_squared(&[4.0, 4.0, 4.0], &[3.0, 4.0, 5.0]), 1.0);
    }

    #[test]
    fn test_mismatched_or_empty_inputs_are_nan() {
        let empty: Vec<f64> = vec![];
        assert!(mean_absolute_error(&empty, &empty).is_nan());
        assert!(mean_squared_error(&[1.0, 2.0, 3.0], &[1.0, 2.0]).is_nan());
        assert!(mean_absolute_percentage_error(&[1.0], &[]).is_nan());
        assert!(r_squared(&[1.0, 2.0], &[1.0]).is_nan());
    }
}
