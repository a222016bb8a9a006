//! Exponential smoothing recurrences
//!
//! Contains:
//! - Simple exponential smoothing (level only)
//! - Double exponential smoothing (Holt's method, level and trend)
//!
//! Both have an incremental form with `update` and a batch form that returns
//! the whole smoothed path along with the one-step-ahead forecasts.

use crate::{MathError, Result};

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(value > 0.0 && value < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "{} must be between 0 and 1 (exclusive), got {}",
            name, value
        )));
    }
    Ok(())
}

/// Simple Exponential Smoothing: `S[t] = alpha * y[t] + (1 - alpha) * S[t-1]`
#[derive(Debug, Clone)]
pub struct SimpleSmoothing {
    alpha: f64,
    level: Option<f64>,
}

impl SimpleSmoothing {
    /// Create a new smoother with the specified alpha (smoothing factor)
    pub fn new(alpha: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        Ok(Self { alpha, level: None })
    }

    /// Feed the next observation and return the new level
    ///
    /// The first observation becomes the initial level unchanged.
    pub fn update(&mut self, value: f64) -> f64 {
        let level = match self.level {
            None => value,
            Some(previous) => self.alpha * value + (1.0 - self.alpha) * previous,
        };
        self.level = Some(level);
        level
    }

    /// Get the current smoothed value
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Forecast for any future step (flat at the current level)
    pub fn forecast(&self) -> Option<f64> {
        self.level
    }

    /// Get the alpha value
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

/// Double Exponential Smoothing (Holt's linear trend method)
///
/// Initialised with `L[0] = y[0]` and `T[0] = y[1] - y[0]`, then
/// `L[t] = alpha * y[t] + (1 - alpha) * (L[t-1] + T[t-1])` and
/// `T[t] = beta * (L[t] - L[t-1]) + (1 - beta) * T[t-1]`.
#[derive(Debug, Clone)]
pub struct HoltSmoothing {
    alpha: f64,
    beta: f64,
    level: Option<f64>,
    trend: Option<f64>,
}

impl HoltSmoothing {
    /// Create a new Holt smoother with the specified parameters
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        check_unit_interval("Alpha", alpha)?;
        check_unit_interval("Beta", beta)?;

        Ok(Self {
            alpha,
            beta,
            level: None,
            trend: None,
        })
    }

    /// Feed the next observation
    ///
    /// The first observation only seeds the level; the second one also fixes
    /// the initial trend before the recurrence is applied.
    pub fn update(&mut self, value: f64) {
        let (prev_level, prev_trend) = match (self.level, self.trend) {
            (None, _) => {
                self.level = Some(value);
                return;
            }
            (Some(level), None) => (level, value - level),
            (Some(level), Some(trend)) => (level, trend),
        };

        let level = self.alpha * value + (1.0 - self.alpha) * (prev_level + prev_trend);
        let trend = self.beta * (level - prev_level) + (1.0 - self.beta) * prev_trend;

        self.level = Some(level);
        self.trend = Some(trend);
    }

    /// Get the current level
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Get the current trend, known once two observations have been seen
    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    /// Forecast `steps` periods ahead: `L + steps * T`
    pub fn forecast(&self, steps: usize) -> Option<f64> {
        match (self.level, self.trend) {
            (Some(level), Some(trend)) => Some(level + steps as f64 * trend),
            _ => None,
        }
    }
}

/// Full smoothed path of a series
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedSeries {
    /// Level after each observation (same length as the input)
    pub levels: Vec<f64>,
    /// Trend after each observation, for Holt's method only
    pub trends: Option<Vec<f64>>,
    /// Forecast of `y[t]` made at `t - 1`, for `t = 1..n` (length `n - 1`)
    pub one_step_ahead: Vec<f64>,
}

impl SmoothedSeries {
    /// Final level
    pub fn last_level(&self) -> Option<f64> {
        self.levels.last().copied()
    }

    /// Final trend, for Holt's method
    pub fn last_trend(&self) -> Option<f64> {
        self.trends.as_ref().and_then(|t| t.last().copied())
    }
}

/// Run simple exponential smoothing over a whole series
pub fn simple_smoothing(values: &[f64], alpha: f64) -> Result<SmoothedSeries> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "No data available for exponential smoothing".to_string(),
        ));
    }

    let mut smoother = SimpleSmoothing::new(alpha)?;
    let mut levels = Vec::with_capacity(values.len());
    let mut one_step_ahead = Vec::with_capacity(values.len() - 1);

    for &value in values {
        if let Some(forecast) = smoother.forecast() {
            one_step_ahead.push(forecast);
        }
        levels.push(smoother.update(value));
    }

    Ok(SmoothedSeries {
        levels,
        trends: None,
        one_step_ahead,
    })
}

/// Run Holt's double exponential smoothing over a whole series
pub fn holt_smoothing(values: &[f64], alpha: f64, beta: f64) -> Result<SmoothedSeries> {
    if values.len() < 2 {
        return Err(MathError::InsufficientData(format!(
            "Double exponential smoothing needs at least 2 observations, got {}",
            values.len()
        )));
    }

    let mut smoother = HoltSmoothing::new(alpha, beta)?;
    smoother.update(values[0]);

    let mut levels = Vec::with_capacity(values.len());
    let mut trends = Vec::with_capacity(values.len());
    let mut one_step_ahead = Vec::with_capacity(values.len() - 1);

    levels.push(values[0]);
    trends.push(values[1] - values[0]);

    for &value in &values[1..] {
        // Before the first trend update, L[0] + T[0] is the first forecast
        let forecast = smoother.forecast(1).unwrap_or(levels[0] + trends[0]);
        one_step_ahead.push(forecast);

        smoother.update(value);
        if let (Some(level), Some(trend)) = (smoother.level(), smoother.trend()) {
            levels.push(level);
            trends.push(trend);
        }
    }

    Ok(SmoothedSeries {
        levels,
        trends: Some(trends),
        one_step_ahead,
    })
}
