//! Metrics module - metric catalogue, samples and single-reading evaluation.

mod metrics_model;
mod readings;

pub use metrics_model::{
    ChangeDirection, DailyHealthSummary, MetricType, ReadingStatus, ReferenceRange,
    TimeSeriesSample,
};
pub use readings::{evaluate_reading, latest_change, reading_change, CHANGE_THRESHOLD};
