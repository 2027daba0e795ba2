//! Numeric helpers shared by aggregation functions

use serde::{Deserialize, Serialize};

/// Variance estimator used for standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Estimator {
    /// Divide by `n`
    #[default]
    Population,
    /// Divide by `n - 1` (Bessel's correction)
    Sample,
}

/// Arithmetic mean, `NaN` for no values
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Running mean and sum of squared deviations (Welford's online update).
///
/// On constant input the mean stays exactly at the repeated value, so the
/// deviation sum stays exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Welford {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one value into the accumulator
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Number of values seen
    pub fn count(&self) -> usize {
        self.count
    }

    /// Running mean, `NaN` before any value
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.mean
    }

    /// Variance with the given estimator, `NaN` when undefined
    pub fn variance(&self, estimator: Estimator) -> f64 {
        match estimator {
            Estimator::Population if self.count > 0 => self.m2 / self.count as f64,
            Estimator::Sample if self.count > 1 => self.m2 / (self.count - 1) as f64,
            _ => f64::NAN,
        }
    }
}

impl FromIterator<f64> for Welford {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        for value in iter {
            acc.update(value);
        }
        acc
    }
}

/// Population standard deviation, `NaN` for no values
pub fn population_std_dev(values: &[f64]) -> f64 {
    std_dev(values, Estimator::Population)
}

/// Sample standard deviation, `NaN` for fewer than two values
pub fn sample_std_dev(values: &[f64]) -> f64 {
    std_dev(values, Estimator::Sample)
}

/// Standard deviation with the given estimator
pub fn std_dev(values: &[f64], estimator: Estimator) -> f64 {
    values
        .iter()
        .copied()
        .collect::<Welford>()
        .variance(estimator)
        .sqrt()
}
