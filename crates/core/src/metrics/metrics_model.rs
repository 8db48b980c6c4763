//! Metric catalogue and reading models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ValidationError;

// =============================================================================
// Metric Type
// =============================================================================

/// Kinds of health measurements tracked over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    HeartRate,
    BloodPressureSys,
    BloodPressureDia,
    BloodSugar,
    Spo2,
    Weight,
    Bmi,
    Steps,
    SleepDuration,
    SleepQuality,
}

impl MetricType {
    pub const ALL: [MetricType; 10] = [
        MetricType::HeartRate,
        MetricType::BloodPressureSys,
        MetricType::BloodPressureDia,
        MetricType::BloodSugar,
        MetricType::Spo2,
        MetricType::Weight,
        MetricType::Bmi,
        MetricType::Steps,
        MetricType::SleepDuration,
        MetricType::SleepQuality,
    ];

    /// Returns the storage name of this metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::HeartRate => "heart_rate",
            MetricType::BloodPressureSys => "blood_pressure_sys",
            MetricType::BloodPressureDia => "blood_pressure_dia",
            MetricType::BloodSugar => "blood_sugar",
            MetricType::Spo2 => "spo2",
            MetricType::Weight => "weight",
            MetricType::Bmi => "bmi",
            MetricType::Steps => "steps",
            MetricType::SleepDuration => "sleep_duration",
            MetricType::SleepQuality => "sleep_quality",
        }
    }

    /// Returns a human-friendly label for this metric.
    pub fn label(&self) -> &'static str {
        match self {
            MetricType::HeartRate => "Heart rate",
            MetricType::BloodPressureSys => "Systolic blood pressure",
            MetricType::BloodPressureDia => "Diastolic blood pressure",
            MetricType::BloodSugar => "Blood sugar",
            MetricType::Spo2 => "Blood oxygen",
            MetricType::Weight => "Weight",
            MetricType::Bmi => "BMI",
            MetricType::Steps => "Daily steps",
            MetricType::SleepDuration => "Sleep duration",
            MetricType::SleepQuality => "Sleep quality",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::HeartRate => "bpm",
            MetricType::BloodPressureSys | MetricType::BloodPressureDia => "mmHg",
            MetricType::BloodSugar => "mmol/L",
            MetricType::Spo2 => "%",
            MetricType::Weight => "kg",
            MetricType::Bmi => "kg/m²",
            MetricType::Steps => "steps",
            MetricType::SleepDuration => "h",
            MetricType::SleepQuality => "points",
        }
    }

    /// Reference range used to flag a single reading, if the metric has one.
    pub fn reference_range(&self) -> Option<ReferenceRange> {
        REFERENCE_RANGES
            .iter()
            .find(|(metric, _)| metric == self)
            .map(|(_, range)| *range)
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MetricType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        MetricType::ALL
            .iter()
            .copied()
            .find(|metric| metric.as_str() == normalized)
            .ok_or_else(|| ValidationError::unknown_value("metric_type", s))
    }
}

// =============================================================================
// Reference Ranges
// =============================================================================

/// Inclusive range of values considered normal for a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

impl ReferenceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

static REFERENCE_RANGES: [(MetricType, ReferenceRange); 6] = [
    (MetricType::HeartRate, ReferenceRange::new(60.0, 100.0)),
    (MetricType::BloodPressureSys, ReferenceRange::new(90.0, 140.0)),
    (MetricType::BloodPressureDia, ReferenceRange::new(60.0, 90.0)),
    (MetricType::BloodSugar, ReferenceRange::new(3.9, 6.1)),
    (MetricType::Bmi, ReferenceRange::new(18.5, 24.9)),
    (MetricType::SleepDuration, ReferenceRange::new(7.0, 9.0)),
];

// =============================================================================
// Reading Status
// =============================================================================

/// Status of a single reading against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ReadingStatus {
    #[default]
    Normal,
    Warning,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Normal => "normal",
            ReadingStatus::Warning => "warning",
        }
    }
}

/// Direction of change between two consecutive readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Stable,
}

impl ChangeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeDirection::Up => "up",
            ChangeDirection::Down => "down",
            ChangeDirection::Stable => "stable",
        }
    }
}

// =============================================================================
// Time Series Sample
// =============================================================================

/// A single timestamped measurement.
///
/// Histories are expected in ascending timestamp order; analyzers do not sort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesSample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Calendar date (UTC) of the sample.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

// =============================================================================
// Daily Health Summary
// =============================================================================

/// Per-day aggregate of wearable data, one record per user and date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyHealthSummary {
    pub date: NaiveDate,

    // Heart rate (bpm)
    pub avg_heart_rate: Option<f64>,
    pub min_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub resting_heart_rate: Option<f64>,

    // Activity
    pub total_steps: Option<u32>,
    pub active_minutes: Option<u32>,
    /// kcal
    pub calories_burned: Option<f64>,
    pub distance_km: Option<f64>,

    // Sleep (hours)
    pub sleep_duration: Option<f64>,
    pub deep_sleep_duration: Option<f64>,
    pub light_sleep_duration: Option<f64>,
    pub rem_sleep_duration: Option<f64>,
    pub awake_count: Option<u32>,
    /// 0 to 100
    pub sleep_quality_score: Option<f64>,

    // Blood oxygen (%)
    pub avg_spo2: Option<f64>,
    pub min_spo2: Option<f64>,

    // Blood pressure (mmHg)
    pub morning_systolic_bp: Option<f64>,
    pub morning_diastolic_bp: Option<f64>,
    pub evening_systolic_bp: Option<f64>,
    pub evening_diastolic_bp: Option<f64>,
}

impl DailyHealthSummary {
    /// Creates an empty summary for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            avg_heart_rate: None,
            min_heart_rate: None,
            max_heart_rate: None,
            resting_heart_rate: None,
            total_steps: None,
            active_minutes: None,
            calories_burned: None,
            distance_km: None,
            sleep_duration: None,
            deep_sleep_duration: None,
            light_sleep_duration: None,
            rem_sleep_duration: None,
            awake_count: None,
            sleep_quality_score: None,
            avg_spo2: None,
            min_spo2: None,
            morning_systolic_bp: None,
            morning_diastolic_bp: None,
            evening_systolic_bp: None,
            evening_diastolic_bp: None,
        }
    }
}
