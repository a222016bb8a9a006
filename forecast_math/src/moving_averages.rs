//! Trailing moving averages
//!
//! [`SimpleMovingAverage`] is the incremental form; [`trailing_means`] runs it
//! over a whole series and keeps every full-window value.

use crate::stats::incremental_mean;
use crate::{MathError, Result};
use std::collections::VecDeque;

/// Simple Moving Average (SMA) over a fixed trailing window
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
}

impl SimpleMovingAverage {
    /// Create a new Simple Moving Average with the specified window size
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MathError::InvalidInput(
                "Window size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
        })
    }

    /// Push a new value, dropping the oldest one once the window is full
    pub fn update(&mut self, value: f64) {
        self.values.push_back(value);
        self.sum += value;

        if self.values.len() > self.window {
            if let Some(old_value) = self.values.pop_front() {
                self.sum -= old_value;
            }
        }
    }

    /// Current average, available once `window` values have been seen
    pub fn value(&self) -> Option<f64> {
        if self.values.len() < self.window {
            return None;
        }
        let window = self.window as f64;
        let mean = self.sum / window;
        if mean.is_finite() {
            return Some(mean);
        }
        // Running sum overflowed; average the buffered window instead
        Some(incremental_mean(&self.values))
    }

    /// Get the window size
    pub fn window(&self) -> usize {
        self.window
    }

    /// Reset the SMA, clearing all values
    pub fn reset(&mut self) {
        self.values.clear();
        self.sum = 0.0;
    }
}

/// Mean of every full trailing window: element `k` averages
/// `values[k..k + window]`, giving `values.len() - window + 1` results.
pub fn trailing_means(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window > values.len() {
        return Err(MathError::InsufficientData(format!(
            "Window size {} exceeds series length {}",
            window,
            values.len()
        )));
    }

    let mut sma = SimpleMovingAverage::new(window)?;
    let mut means = Vec::with_capacity(values.len() + 1 - window);

    for &value in values {
        sma.update(value);
        if let Some(mean) = sma.value() {
            means.push(mean);
        }
    }

    Ok(means)
}
