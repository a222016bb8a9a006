//! Ordinary least-squares trend over the series index
//!
//! The independent variable is the position `x = 0..n-1`; only the observed
//! values are needed.

use crate::stats::mean;
use crate::{MathError, Result};

/// Fitted straight line `y = slope * x + intercept` with the sums needed for
/// prediction intervals
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRegression {
    slope: f64,
    intercept: f64,
    /// Mean of the index values
    x_mean: f64,
    /// Sum of squared index deviations, `Σ(x - x̄)²`
    sxx: f64,
    /// Residual sum of squares
    rss: f64,
    /// Total sum of squares of the observations
    tss: f64,
    n: usize,
}

impl IndexRegression {
    /// Fit a line through `values` indexed by position
    ///
    /// When the index has no spread (a single point) the line degrades to
    /// `slope = 0, intercept = ȳ`.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(MathError::InsufficientData(
                "Not enough data for regression. Need at least 1 point.".to_string(),
            ));
        }

        let n = values.len();
        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = mean(values);

        let mut sxy = 0.0;
        let mut sxx = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            sxy += dx * (y - y_mean);
            sxx += dx * dx;
        }

        let (slope, intercept) = if sxx == 0.0 {
            (0.0, y_mean)
        } else {
            let slope = sxy / sxx;
            (slope, y_mean - slope * x_mean)
        };

        let mut rss = 0.0;
        let mut tss = 0.0;
        for (i, &y) in values.iter().enumerate() {
            rss += (y - (slope * i as f64 + intercept)).powi(2);
            tss += (y - y_mean).powi(2);
        }

        Ok(Self {
            slope,
            intercept,
            x_mean,
            sxx,
            rss,
            tss,
            n,
        })
    }

    /// Value of the line at index `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// In-sample values for `x = 0..n-1`
    pub fn fitted_values(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.predict(i as f64)).collect()
    }

    /// Residual standard error, `sqrt(RSS / (n - 2))`
    ///
    /// With two or fewer points the line passes through every observation and
    /// there are no residual degrees of freedom; the error is reported as 0.
    pub fn residual_standard_error(&self) -> f64 {
        if self.n <= 2 {
            return 0.0;
        }
        (self.rss / (self.n - 2) as f64).sqrt()
    }

    /// Standard error of a new observation at index `x`:
    /// `se * sqrt(1 + 1/n + (x - x̄)² / Sxx)`
    pub fn prediction_standard_error(&self, x: f64) -> f64 {
        let se = self.residual_standard_error();
        let leverage = if self.sxx == 0.0 {
            0.0
        } else {
            (x - self.x_mean).powi(2) / self.sxx
        };
        se * (1.0 + 1.0 / self.n as f64 + leverage).sqrt()
    }

    /// Coefficient of determination, 1 for a constant series
    pub fn r_squared(&self) -> f64 {
        if self.tss == 0.0 {
            1.0
        } else {
            1.0 - self.rss / self.tss
        }
    }

    /// Residual degrees of freedom, `n - 2` (saturating)
    pub fn degrees_of_freedom(&self) -> usize {
        self.n.saturating_sub(2)
    }

    /// Get the slope (trend per period)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Get the intercept (value at index 0)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Mean of the index values
    pub fn x_mean(&self) -> f64 {
        self.x_mean
    }

    /// Number of observations fitted
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always false for a fitted regression
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
