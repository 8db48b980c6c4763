//! Trend analysis domain models.
//!
//! This module contains the outputs of the analyzers:
//! - Trend direction, strength and the trend result
//! - Statistical and medical anomalies and the anomaly report
//! - Health categories and the composite health score
//! - The analytics configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::trends_errors::TrendError;
use crate::metrics::MetricType;

// =============================================================================
// Trend
// =============================================================================

/// Direction of a metric's recent history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
    /// Fewer than three points
    Unknown,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
            TrendDirection::Stable => "stable",
            TrendDirection::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Magnitude of the regression slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
    Unknown,
}

impl TrendStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendStrength::Weak => "weak",
            TrendStrength::Moderate => "moderate",
            TrendStrength::Strong => "strong",
            TrendStrength::Unknown => "unknown",
        }
    }
}

/// Result of analysing one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// First-to-last change in percent, two decimals
    pub change_rate_pct: f64,
    /// Same length as the input, one decimal
    pub moving_average: Vec<f64>,
    /// One value per forecast step, one decimal
    pub forecast: Vec<f64>,
    pub narrative: String,
}

impl TrendResult {
    pub fn is_unknown(&self) -> bool {
        self.direction == TrendDirection::Unknown
    }
}

// =============================================================================
// Anomalies
// =============================================================================

/// Severity of a flagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Warning,
    Critical,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalySeverity::Warning => "warning",
            AnomalySeverity::Critical => "critical",
        }
    }
}

/// Side of the expected range a value falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    High,
    Low,
}

/// Statistical detector that flagged a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    ZScore,
    Iqr,
}

/// A value whose Z-score exceeds the threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZScoreAnomaly {
    pub index: usize,
    pub value: f64,
    /// Two decimals
    pub z_score: f64,
    pub deviation: Deviation,
}

/// A value outside the interquartile fences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IqrAnomaly {
    pub index: usize,
    pub value: f64,
    /// One decimal
    pub lower_bound: f64,
    /// One decimal
    pub upper_bound: f64,
    pub deviation: Deviation,
}

/// Classification of a single value against the medical threshold table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalStatus {
    pub metric: MetricType,
    pub value: f64,
    pub unit: String,
    pub severity: AnomalySeverity,
    pub deviation: Deviation,
    /// e.g. "Critically high (≥120)"
    pub message: String,
}

/// A statistically flagged value, enriched with its medical classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub index: usize,
    pub value: f64,
    pub date: Option<NaiveDate>,
    pub severity: AnomalySeverity,
    pub message: String,
    pub detected_by: Vec<DetectionMethod>,
}

/// Merged output of the anomaly detectors for one series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyReport {
    pub has_anomaly: bool,
    pub anomaly_count: usize,
    /// Ascending by index
    pub anomalies: Vec<Anomaly>,
    /// Medical status of the latest value, when it is not normal
    pub latest_status: Option<MedicalStatus>,
    pub summary: String,
}

impl AnomalyReport {
    /// Report for an empty series.
    pub fn no_data() -> Self {
        Self {
            has_anomaly: false,
            anomaly_count: 0,
            anomalies: Vec::new(),
            latest_status: None,
            summary: "No data available".to_string(),
        }
    }
}

// =============================================================================
// Health Score
// =============================================================================

/// Category of the composite health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthCategory {
    HeartRate,
    BloodPressure,
    BloodSugar,
    Sleep,
    Activity,
    Weight,
    Spo2,
}

impl HealthCategory {
    /// Weight of this category in the composite score.
    pub fn weight(&self) -> f64 {
        match self {
            HealthCategory::HeartRate => 0.15,
            HealthCategory::BloodPressure => 0.20,
            HealthCategory::BloodSugar => 0.15,
            HealthCategory::Sleep => 0.15,
            HealthCategory::Activity => 0.15,
            HealthCategory::Weight => 0.10,
            HealthCategory::Spo2 => 0.10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthCategory::HeartRate => "heart_rate",
            HealthCategory::BloodPressure => "blood_pressure",
            HealthCategory::BloodSugar => "blood_sugar",
            HealthCategory::Sleep => "sleep",
            HealthCategory::Activity => "activity",
            HealthCategory::Weight => "weight",
            HealthCategory::Spo2 => "spo2",
        }
    }
}

/// Overall health band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    /// No metric was available to score
    Unknown,
}

impl HealthLevel {
    /// Band for an overall score.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => HealthLevel::Excellent,
            75..=89 => HealthLevel::Good,
            60..=74 => HealthLevel::Fair,
            _ => HealthLevel::Poor,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            HealthLevel::Excellent => "Your health is excellent, keep it up!",
            HealthLevel::Good => "Your health is good, keep up your healthy habits",
            HealthLevel::Fair => "Your health is fair, consider improving your lifestyle",
            HealthLevel::Poor => "Your health needs attention, consider seeing a doctor",
            HealthLevel::Unknown => "Not enough data to calculate an accurate score",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Excellent => "excellent",
            HealthLevel::Good => "good",
            HealthLevel::Fair => "fair",
            HealthLevel::Poor => "poor",
            HealthLevel::Unknown => "unknown",
        }
    }
}

/// Latest value of each scored metric. Absent metrics are left out of the score.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub heart_rate: Option<f64>,
    pub systolic_bp: Option<f64>,
    pub diastolic_bp: Option<f64>,
    pub blood_sugar: Option<f64>,
    pub sleep_duration: Option<f64>,
    pub steps: Option<f64>,
    pub spo2: Option<f64>,
    pub bmi: Option<f64>,
}

impl HealthMetrics {
    /// Metrics that carry a value, in catalogue order.
    pub fn metrics_used(&self) -> Vec<MetricType> {
        [
            (MetricType::HeartRate, self.heart_rate),
            (MetricType::BloodPressureSys, self.systolic_bp),
            (MetricType::BloodPressureDia, self.diastolic_bp),
            (MetricType::BloodSugar, self.blood_sugar),
            (MetricType::Spo2, self.spo2),
            (MetricType::Bmi, self.bmi),
            (MetricType::Steps, self.steps),
            (MetricType::SleepDuration, self.sleep_duration),
        ]
        .into_iter()
        .filter_map(|(metric, value)| value.map(|_| metric))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics_used().is_empty()
    }
}

/// Weighted blend of the category scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompositeHealthScore {
    /// 0 to 100
    pub overall_score: u8,
    /// Rounded score of each category present in the input
    pub category_scores: BTreeMap<HealthCategory, u8>,
    pub level: HealthLevel,
    pub summary: String,
}

// =============================================================================
// Analytics Configuration
// =============================================================================

/// Configuration for trend analysis and anomaly detection.
///
/// Defaults reproduce the published behaviour; every threshold can be tuned
/// per deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConfig {
    /// |z| above which a value is a Z-score anomaly (default: 2.5)
    pub z_score_threshold: f64,

    /// IQR multiplier for the outlier fences (default: 1.5)
    pub iqr_multiplier: f64,

    /// Trailing window of the moving average (default: 7)
    pub moving_average_window: usize,

    /// Most recent points used for the regression (default: 14)
    pub regression_window: usize,

    /// Number of forecast steps (default: 7)
    pub forecast_horizon: usize,

    /// Daily step goal for the activity reach rate (default: 8000)
    pub daily_step_goal: u32,

    /// Days of history for metric trends (default: 30)
    pub default_trend_days: u32,

    /// Days of history for device trends (default: 7)
    pub device_trend_days: u32,

    /// Days of history for sleep trends (default: 14)
    pub sleep_trend_days: u32,

    /// Days of history for activity trends (default: 14)
    pub activity_trend_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            z_score_threshold: 2.5,
            iqr_multiplier: 1.5,
            moving_average_window: 7,
            regression_window: 14,
            forecast_horizon: 7,
            daily_step_goal: 8000,
            default_trend_days: 30,
            device_trend_days: 7,
            sleep_trend_days: 14,
            activity_trend_days: 14,
        }
    }
}

impl AnalyticsConfig {
    /// Checks every field against its accepted domain.
    pub fn validate(&self) -> Result<(), TrendError> {
        if !(self.z_score_threshold.is_finite() && self.z_score_threshold > 0.0) {
            return Err(TrendError::InvalidConfig(
                "z_score_threshold must be a positive number".to_string(),
            ));
        }
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(TrendError::InvalidConfig(
                "iqr_multiplier must be a positive number".to_string(),
            ));
        }
        if self.moving_average_window == 0 {
            return Err(TrendError::InvalidConfig(
                "moving_average_window must be >= 1".to_string(),
            ));
        }
        if self.regression_window < 2 {
            return Err(TrendError::InvalidConfig(
                "regression_window must be >= 2".to_string(),
            ));
        }
        if self.forecast_horizon == 0 {
            return Err(TrendError::InvalidConfig(
                "forecast_horizon must be >= 1".to_string(),
            ));
        }
        if self.daily_step_goal == 0 {
            return Err(TrendError::InvalidConfig(
                "daily_step_goal must be > 0".to_string(),
            ));
        }
        let windows = [
            ("default_trend_days", self.default_trend_days),
            ("device_trend_days", self.device_trend_days),
            ("sleep_trend_days", self.sleep_trend_days),
            ("activity_trend_days", self.activity_trend_days),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, days)| *days == 0) {
            return Err(TrendError::InvalidConfig(format!("{} must be >= 1", name)));
        }
        Ok(())
    }
}
