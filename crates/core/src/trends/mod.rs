//! Trends module.
//!
//! Turns metric histories into trends, anomaly reports and a composite score:
//!
//! - **Models** (`trends_model.rs`) - Trend, anomaly and score types, `AnalyticsConfig`
//! - **Analyzers** (`analyzers/`) - `TrendAnalyzer`, `AnomalyDetector`, `HealthScoreCalculator`
//! - **Reports** (`trends_reports.rs`) - What the service returns
//! - **Service** (`trends_service.rs`) - Loads data through the repository traits
//!
//! The analyzers are pure and never fail; short or empty series yield
//! "unknown" or empty results.

pub mod analyzers;
pub mod trends_errors;
pub mod trends_model;
pub mod trends_reports;
pub mod trends_service;
pub mod trends_traits;

pub use analyzers::{
    AnomalyDetector, HealthScoreCalculator, TrendAnalyzer, MIN_IQR_POINTS, MIN_TREND_POINTS,
    MIN_ZSCORE_POINTS,
};
pub use trends_errors::TrendError;
pub use trends_model::{
    AnalyticsConfig, Anomaly, AnomalyReport, AnomalySeverity, CompositeHealthScore,
    DetectionMethod, Deviation, HealthCategory, HealthLevel, HealthMetrics, IqrAnomaly,
    MedicalStatus, TrendDirection, TrendResult, TrendStrength, ZScoreAnomaly,
};
pub use trends_reports::{
    ActivityTrendReport, AnalysisAnomaly, AnomalySource, ComprehensiveAnalysis, DailyAggregate,
    DeviceTrendReport, ForecastSeries, HealthScoreReport, MetricTrendReport, SleepAnomaly,
    SleepAnomalyKind, SleepTrendReport, NO_DATA_NARRATIVE,
};
pub use trends_service::TrendService;
pub use trends_traits::{
    DailySummaryRepositoryTrait, MetricHistoryRepositoryTrait, TrendServiceTrait,
};
