use serde::{Deserialize, Serialize};

/// Rounds `value` to `decimals` decimal places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by n), 0 for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    population_variance(values).sqrt()
}

/// Returns a sorted copy of `values` using IEEE total ordering.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Descriptive statistics of a metric history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStatistics {
    pub count: usize,
    /// Mean, one decimal
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Upper median: `sorted[n / 2]`
    pub median: f64,
    /// Population standard deviation, two decimals
    pub std_dev: f64,
}

impl SeriesStatistics {
    /// Describes `values`, or returns None when there is nothing to describe.
    pub fn describe(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let ordered = sorted(values);
        let n = ordered.len();
        Some(Self {
            count: n,
            average: round_to(mean(values), 1),
            min: round_to(ordered[0], 1),
            max: round_to(ordered[n - 1], 1),
            median: round_to(ordered[n / 2], 1),
            std_dev: round_to(population_std_dev(values), 2),
        })
    }
}
