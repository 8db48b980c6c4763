//! Reports assembled by the trend service.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::trends_model::{
    AnomalyReport, AnomalySeverity, CompositeHealthScore, HealthMetrics, TrendDirection,
    TrendResult, TrendStrength,
};
use crate::metrics::{ChangeDirection, MetricType, ReadingStatus};
use crate::utils::math_utils::SeriesStatistics;

/// Narrative used when a window holds no data at all.
pub const NO_DATA_NARRATIVE: &str = "No data available for this period";

/// Trend result for a window without any sample.
pub(crate) fn empty_trend() -> TrendResult {
    TrendResult {
        direction: TrendDirection::Unknown,
        strength: TrendStrength::Unknown,
        change_rate_pct: 0.0,
        moving_average: Vec::new(),
        forecast: Vec::new(),
        narrative: NO_DATA_NARRATIVE.to_string(),
    }
}

// =============================================================================
// Metric Trend
// =============================================================================

/// Forecast values paired with the day each one belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSeries {
    pub values: Vec<f64>,
    pub dates: Vec<NaiveDate>,
}

/// Trend, anomalies and statistics of one metric over a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricTrendReport {
    pub metric: MetricType,
    pub days: u32,
    pub values: Vec<f64>,
    pub dates: Vec<NaiveDate>,
    pub trend: TrendResult,
    pub anomalies: AnomalyReport,
    pub statistics: Option<SeriesStatistics>,
    pub forecast: ForecastSeries,
    pub latest_value: Option<f64>,
    pub latest_status: Option<ReadingStatus>,
    pub latest_change: Option<ChangeDirection>,
}

impl MetricTrendReport {
    pub fn empty(metric: MetricType, days: u32) -> Self {
        Self {
            metric,
            days,
            values: Vec::new(),
            dates: Vec::new(),
            trend: empty_trend(),
            anomalies: AnomalyReport::no_data(),
            statistics: None,
            forecast: ForecastSeries::default(),
            latest_value: None,
            latest_status: None,
            latest_change: None,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.values.is_empty()
    }
}

// =============================================================================
// Device Trend
// =============================================================================

/// Raw device readings of one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// One decimal
    pub average: f64,
    /// One decimal
    pub min: f64,
    /// One decimal
    pub max: f64,
    pub count: usize,
}

/// Trend of a metric's daily averages, built from raw device readings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTrendReport {
    pub metric: MetricType,
    pub days: u32,
    /// Ascending by date
    pub daily: Vec<DailyAggregate>,
    pub trend: TrendResult,
    pub anomalies: AnomalyReport,
    /// Statistics of the daily averages
    pub statistics: Option<SeriesStatistics>,
    /// Forecast of the daily average for the days after the last recorded day
    pub forecast: ForecastSeries,
}

impl DeviceTrendReport {
    pub fn empty(metric: MetricType, days: u32) -> Self {
        Self {
            metric,
            days,
            daily: Vec::new(),
            trend: empty_trend(),
            anomalies: AnomalyReport::no_data(),
            statistics: None,
            forecast: ForecastSeries::default(),
        }
    }
}

// =============================================================================
// Sleep Trend
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepAnomalyKind {
    /// Under five hours
    ShortSleep,
    /// More than five awakenings
    FrequentWake,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepAnomaly {
    pub date: NaiveDate,
    pub kind: SleepAnomalyKind,
    pub value: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepTrendReport {
    pub days: u32,
    pub dates: Vec<NaiveDate>,
    /// Hours per night, missing nights count as 0
    pub durations: Vec<f64>,
    pub quality_scores: Vec<f64>,
    pub duration_trend: TrendResult,
    pub quality_trend: TrendResult,
    pub anomalies: Vec<SleepAnomaly>,
    /// Hours, one decimal
    pub avg_duration: f64,
    /// Rounded to a whole point
    pub avg_quality: f64,
    /// Hours, one decimal
    pub avg_deep_sleep: f64,
    /// Share of deep sleep in percent, one decimal
    pub deep_sleep_ratio: f64,
    pub summary: String,
}

// =============================================================================
// Activity Trend
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTrendReport {
    pub days: u32,
    pub dates: Vec<NaiveDate>,
    pub steps: Vec<f64>,
    pub calories: Vec<f64>,
    pub active_minutes: Vec<f64>,
    pub distance_km: Vec<f64>,
    pub steps_trend: TrendResult,
    pub daily_step_goal: u32,
    pub goal_reached_days: usize,
    /// Percent of days reaching the goal, one decimal
    pub goal_reach_rate: f64,
    /// Rounded to whole steps
    pub avg_steps: f64,
    pub max_steps: f64,
    pub avg_calories: f64,
    pub avg_active_minutes: f64,
    pub avg_distance_km: f64,
    pub summary: String,
}

// =============================================================================
// Health Score
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthScoreReport {
    #[serde(flatten)]
    pub score: CompositeHealthScore,
    /// Values the score was computed from
    pub metrics: HealthMetrics,
    pub metrics_used: Vec<MetricType>,
    /// False when no metric was available and the score is a placeholder
    pub data_sufficient: bool,
}

// =============================================================================
// Comprehensive Analysis
// =============================================================================

/// Series an analysis anomaly was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySource {
    HeartRate,
    Sleep,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisAnomaly {
    pub source: AnomalySource,
    pub date: Option<NaiveDate>,
    pub value: f64,
    pub severity: AnomalySeverity,
    pub message: String,
}

/// Health score, recent trends and recommendations in one report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveAnalysis {
    pub user_id: String,
    pub health_score: HealthScoreReport,
    pub heart_rate: DeviceTrendReport,
    pub sleep: Option<SleepTrendReport>,
    pub activity: Option<ActivityTrendReport>,
    /// At most ten, heart rate first
    pub anomalies: Vec<AnalysisAnomaly>,
    /// Total before capping
    pub anomaly_count: usize,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
