//! Critical values for scaling a standard error into an interval half-width
//!
//! The default lookups are deliberately coarse: a four-level z table and a
//! small Student-t table keyed by a handful of degrees of freedom. Queries
//! snap to the nearest available key instead of interpolating.
//! [`CriticalValueMethod::Exact`] computes the two-sided quantiles from the
//! normal and Student-t distributions instead.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Confidence levels covered by the t table, in column order
const T_TABLE_LEVELS: [f64; 4] = [0.80, 0.90, 0.95, 0.99];

/// Two-sided Student-t critical values by degrees of freedom
const T_TABLE: [(usize, [f64; 4]); 8] = [
    (1, [3.078, 6.314, 12.706, 63.657]),
    (2, [1.886, 2.920, 4.303, 9.925]),
    (3, [1.638, 2.353, 3.182, 5.841]),
    (4, [1.533, 2.132, 2.776, 4.604]),
    (5, [1.476, 2.015, 2.571, 4.032]),
    (10, [1.372, 1.812, 2.228, 3.169]),
    (20, [1.325, 1.725, 2.086, 2.845]),
    (30, [1.310, 1.697, 2.042, 2.750]),
];

/// Above this many degrees of freedom the t distribution is treated as normal
pub const T_TABLE_MAX_DF: usize = 30;

/// How critical values are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriticalValueMethod {
    /// Nearest-key lookup in the built-in approximate tables
    #[default]
    Table,
    /// Quantiles from the normal and Student-t inverse CDFs
    Exact,
}

impl CriticalValueMethod {
    /// Normal critical value for a two-sided interval at `level`
    pub fn z(self, level: f64) -> Result<f64> {
        match self {
            CriticalValueMethod::Table => Ok(z_score(level)),
            CriticalValueMethod::Exact => {
                let p = two_sided_quantile(level)?;
                let normal = Normal::new(0.0, 1.0)
                    .map_err(|e| MathError::CalculationError(e.to_string()))?;
                Ok(normal.inverse_cdf(p))
            }
        }
    }

    /// Student-t critical value for a two-sided interval at `level`
    pub fn t(self, level: f64, degrees_of_freedom: usize) -> Result<f64> {
        match self {
            CriticalValueMethod::Table => Ok(t_score(level, degrees_of_freedom)),
            CriticalValueMethod::Exact => {
                let p = two_sided_quantile(level)?;
                let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom.max(1) as f64)
                    .map_err(|e| MathError::CalculationError(e.to_string()))?;
                Ok(dist.inverse_cdf(p))
            }
        }
    }
}

fn two_sided_quantile(level: f64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Exact critical values need a confidence level strictly between 0 and 1, got {}",
            level
        )));
    }
    Ok((1.0 + level) / 2.0)
}

/// Approximate z-score for a confidence level
///
/// Levels below 0.80 fall back to the 95% value.
pub fn z_score(level: f64) -> f64 {
    match level {
        c if c >= 0.99 => 2.576,
        c if c >= 0.95 => 1.96,
        c if c >= 0.90 => 1.645,
        c if c >= 0.80 => 1.282,
        _ => 1.96,
    }
}

/// Approximate t-score for a confidence level and degrees of freedom
///
/// Beyond [`T_TABLE_MAX_DF`] this is [`z_score`]. Otherwise both the degrees of
/// freedom and the level snap to the nearest table key by absolute
/// difference; on a tie the smaller key wins, and zero degrees of freedom
/// uses the first row.
pub fn t_score(level: f64, degrees_of_freedom: usize) -> f64 {
    if degrees_of_freedom > T_TABLE_MAX_DF {
        return z_score(level);
    }

    let row = T_TABLE
        .iter()
        .min_by_key(|(df, _)| df.abs_diff(degrees_of_freedom))
        .map(|(_, row)| row)
        .unwrap_or(&T_TABLE[0].1);

    let column = T_TABLE_LEVELS
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, &key)| {
            let distance = (key - level).abs();
            if distance < best.1 {
                (i, distance)
            } else {
                best
            }
        })
        .0;

    row[column]
}
