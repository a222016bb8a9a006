//! Descriptive statistics used for residual analysis

/// Arithmetic mean, `NaN` for an empty slice
///
/// Falls back to [`incremental_mean`] when the plain sum overflows, so finite
/// inputs near `f64::MAX` still give a finite mean.
pub fn mean(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean.is_finite() || values.iter().any(|v| !v.is_finite()) {
        return mean;
    }
    incremental_mean(values)
}

/// Mean updated one value at a time, `m += (v - m) / k`
///
/// Never forms the full sum. Returns 0 for no values.
pub fn incremental_mean<'a>(values: impl IntoIterator<Item = &'a f64>) -> f64 {
    values
        .into_iter()
        .enumerate()
        .fold(0.0, |mean, (i, &value)| mean + (value - mean) / (i + 1) as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`)
///
/// Returns `NaN` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|&value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;

    variance.sqrt()
}

/// Element-wise `actual - fitted` over the common prefix of both slices
pub fn residuals(actual: &[f64], fitted: &[f64]) -> Vec<f64> {
    actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| a - f)
        .collect()
}
