use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::trends_model::AnalyticsConfig;
use super::trends_reports::{
    ActivityTrendReport, ComprehensiveAnalysis, DeviceTrendReport, HealthScoreReport,
    MetricTrendReport, SleepTrendReport,
};
use crate::errors::Result;
use crate::metrics::{DailyHealthSummary, MetricType, TimeSeriesSample};

/// Trait for metric history repository operations
#[async_trait]
pub trait MetricHistoryRepositoryTrait: Send + Sync {
    /// Recorded samples of `metric` at or after `since`, ascending by timestamp.
    async fn get_metric_history(
        &self,
        user_id: &str,
        metric: MetricType,
        since: DateTime<Utc>,
    ) -> Result<Vec<TimeSeriesSample>>;

    async fn get_latest_metric(
        &self,
        user_id: &str,
        metric: MetricType,
    ) -> Result<Option<TimeSeriesSample>>;

    /// Raw wearable readings of `metric` at or after `since`, ascending by timestamp.
    async fn get_device_readings(
        &self,
        user_id: &str,
        metric: MetricType,
        since: DateTime<Utc>,
    ) -> Result<Vec<TimeSeriesSample>>;
}

/// Trait for daily summary repository operations
#[async_trait]
pub trait DailySummaryRepositoryTrait: Send + Sync {
    /// Summaries dated on or after `since`, ascending by date.
    async fn get_daily_summaries(
        &self,
        user_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<DailyHealthSummary>>;

    async fn get_latest_daily_summary(&self, user_id: &str)
        -> Result<Option<DailyHealthSummary>>;
}

/// Trait for trend service operations
#[async_trait]
pub trait TrendServiceTrait: Send + Sync {
    async fn get_config(&self) -> AnalyticsConfig;

    /// Replaces the configuration after validating it.
    async fn update_config(&self, config: AnalyticsConfig) -> Result<()>;

    /// `days` defaults to the configured metric trend window.
    async fn get_metric_trend(
        &self,
        user_id: &str,
        metric: MetricType,
        days: Option<u32>,
    ) -> Result<MetricTrendReport>;

    async fn get_device_trend(
        &self,
        user_id: &str,
        metric: MetricType,
        days: Option<u32>,
    ) -> Result<DeviceTrendReport>;

    /// None when the window holds no daily summary.
    async fn get_sleep_trend(&self, user_id: &str, days: Option<u32>)
        -> Result<Option<SleepTrendReport>>;

    /// None when the window holds no daily summary.
    async fn get_activity_trend(
        &self,
        user_id: &str,
        days: Option<u32>,
    ) -> Result<Option<ActivityTrendReport>>;

    async fn get_health_score(&self, user_id: &str) -> Result<HealthScoreReport>;

    async fn get_comprehensive_analysis(&self, user_id: &str) -> Result<ComprehensiveAnalysis>;
}
