//! Pure analyzers over numeric series.

pub mod anomaly_detector;
pub mod health_score;
pub mod trend_analyzer;

pub use anomaly_detector::{AnomalyDetector, MIN_IQR_POINTS, MIN_ZSCORE_POINTS};
pub use health_score::HealthScoreCalculator;
pub use trend_analyzer::{TrendAnalyzer, MIN_TREND_POINTS};
