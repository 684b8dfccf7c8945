//! # statistics.rs
//!
//! Descriptive statistics of a sample. Variance and standard deviation are
//! the population forms (divided by `n`).

use crate::error::{CalcError, CalcResult};
use crate::formulas::require_finite;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summarizes `samples`.
///
/// # Errors
/// [`CalcError::InvalidInput`] when the sample is empty or holds a
/// non-finite value.
pub fn summarize(samples: &[f64]) -> CalcResult<Summary> {
    if samples.is_empty() {
        return Err(CalcError::input("samples", "at least one number is required"));
    }
    for &value in samples {
        require_finite("samples", value)?;
    }

    let count = samples.len();
    let n = count as f64;
    let sum: f64 = samples.iter().sum();
    let mean = sum / n;

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    Ok(Summary {
        count,
        sum,
        mean,
        median,
        variance,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
    })
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Count: {}", self.count)?;
        writeln!(f, "Sum: {:.2}", self.sum)?;
        writeln!(f, "Mean: {:.2}", self.mean)?;
        writeln!(f, "Median: {:.2}", self.median)?;
        writeln!(f, "Std Dev: {:.2}", self.std_dev)?;
        writeln!(f, "Variance: {:.2}", self.variance)?;
        writeln!(f, "Min: {:.2}", self.min)?;
        write!(f, "Max: {:.2}", self.max)
    }
}
