//! Single-reading evaluation against reference ranges.

use super::metrics_model::{ChangeDirection, MetricType, ReadingStatus};

/// Minimum absolute difference between readings that counts as a change.
pub const CHANGE_THRESHOLD: f64 = 0.5;

/// Flags a single reading as normal when it lies inside the metric's inclusive
/// reference range. Metrics without a range are always normal.
pub fn evaluate_reading(metric: MetricType, value: f64) -> ReadingStatus {
    match metric.reference_range() {
        Some(range) if !range.contains(value) => ReadingStatus::Warning,
        _ => ReadingStatus::Normal,
    }
}

/// Direction of change from `previous` to `latest`.
pub fn reading_change(previous: f64, latest: f64) -> ChangeDirection {
    let diff = latest - previous;
    if diff.abs() < CHANGE_THRESHOLD {
        ChangeDirection::Stable
    } else if diff > 0.0 {
        ChangeDirection::Up
    } else {
        ChangeDirection::Down
    }
}

/// Direction of change across the last two values of a history, if it has two.
pub fn latest_change(values: &[f64]) -> Option<ChangeDirection> {
    match values {
        [.., previous, latest] => Some(reading_change(*previous, *latest)),
        _ => None,
    }
}
