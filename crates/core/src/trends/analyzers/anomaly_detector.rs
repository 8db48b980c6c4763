//! Statistical (Z-score, IQR) and rule-based (medical threshold) anomaly detection.
//!
//! The statistical detectors pick out unusual values in a series; each of
//! them is then classified against the medical thresholds of its metric.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::metrics::MetricType;
use crate::trends::trends_model::{
    AnalyticsConfig, Anomaly, AnomalyReport, AnomalySeverity, DetectionMethod, Deviation,
    IqrAnomaly, MedicalStatus, ZScoreAnomaly,
};
use crate::utils::math_utils::{mean, population_variance, round_to, sorted};

/// Minimum number of points for the Z-score detector.
pub const MIN_ZSCORE_POINTS: usize = 3;

/// Minimum number of points for the IQR detector.
pub const MIN_IQR_POINTS: usize = 4;

/// Clinical thresholds for one metric.
#[derive(Debug, Clone, Copy)]
struct MedicalThresholds {
    critical_low: f64,
    low: f64,
    high: f64,
    critical_high: f64,
}

// SpO2 uses 100 as both upper thresholds, so a reading of exactly 100 is
// classified as critically high.
static MEDICAL_THRESHOLDS: [(MetricType, MedicalThresholds); 5] = [
    (
        MetricType::HeartRate,
        MedicalThresholds {
            critical_low: 40.0,
            low: 50.0,
            high: 100.0,
            critical_high: 120.0,
        },
    ),
    (
        MetricType::BloodPressureSys,
        MedicalThresholds {
            critical_low: 80.0,
            low: 90.0,
            high: 140.0,
            critical_high: 180.0,
        },
    ),
    (
        MetricType::BloodPressureDia,
        MedicalThresholds {
            critical_low: 50.0,
            low: 60.0,
            high: 90.0,
            critical_high: 120.0,
        },
    ),
    (
        MetricType::BloodSugar,
        MedicalThresholds {
            critical_low: 3.0,
            low: 3.9,
            high: 6.1,
            critical_high: 11.1,
        },
    ),
    (
        MetricType::Spo2,
        MedicalThresholds {
            critical_low: 90.0,
            low: 94.0,
            high: 100.0,
            critical_high: 100.0,
        },
    ),
];

fn thresholds_for(metric: MetricType) -> Option<&'static MedicalThresholds> {
    MEDICAL_THRESHOLDS
        .iter()
        .find(|(m, _)| *m == metric)
        .map(|(_, t)| t)
}

/// Detects anomalous values in a metric history.
pub struct AnomalyDetector {
    z_score_threshold: f64,
    iqr_multiplier: f64,
}

impl AnomalyDetector {
    /// Creates a detector with the default thresholds (|z| > 2.5, 1.5 × IQR).
    pub fn new() -> Self {
        Self::with_config(&AnalyticsConfig::default())
    }

    pub fn with_config(config: &AnalyticsConfig) -> Self {
        Self {
            z_score_threshold: config.z_score_threshold,
            iqr_multiplier: config.iqr_multiplier,
        }
    }

    /// Flags values whose population Z-score exceeds the threshold in absolute value.
    pub fn detect_zscore(&self, data: &[f64]) -> Vec<ZScoreAnomaly> {
        if data.len() < MIN_ZSCORE_POINTS {
            return Vec::new();
        }

        let avg = mean(data);
        let variance = population_variance(data);
        let std_dev = if variance > 0.0 { variance.sqrt() } else { 1.0 };

        data.iter()
            .enumerate()
            .filter_map(|(index, &value)| {
                let z = (value - avg) / std_dev;
                (z.abs() > self.z_score_threshold).then(|| ZScoreAnomaly {
                    index,
                    value,
                    z_score: round_to(z, 2),
                    deviation: if z > 0.0 { Deviation::High } else { Deviation::Low },
                })
            })
            .collect()
    }

    /// Flags values outside `[q1 - k·iqr, q3 + k·iqr]`.
    ///
    /// Quartiles are read at the integer indices `n / 4` and `3n / 4` of the
    /// sorted data, without interpolation.
    pub fn detect_iqr(&self, data: &[f64]) -> Vec<IqrAnomaly> {
        if data.len() < MIN_IQR_POINTS {
            return Vec::new();
        }

        let ordered = sorted(data);
        let n = ordered.len();
        let q1 = ordered[n / 4];
        let q3 = ordered[3 * n / 4];
        let iqr = q3 - q1;
        let lower_bound = q1 - self.iqr_multiplier * iqr;
        let upper_bound = q3 + self.iqr_multiplier * iqr;

        data.iter()
            .enumerate()
            .filter(|(_, &value)| value < lower_bound || value > upper_bound)
            .map(|(index, &value)| IqrAnomaly {
                index,
                value,
                lower_bound: round_to(lower_bound, 1),
                upper_bound: round_to(upper_bound, 1),
                deviation: if value > upper_bound {
                    Deviation::High
                } else {
                    Deviation::Low
                },
            })
            .collect()
    }

    /// Classifies one value against the metric's clinical thresholds.
    ///
    /// Returns None for normal values and for metrics without a threshold table.
    pub fn detect_medical(value: f64, metric: MetricType) -> Option<MedicalStatus> {
        let t = thresholds_for(metric)?;

        let (severity, deviation, message) = if value <= t.critical_low {
            (
                AnomalySeverity::Critical,
                Deviation::Low,
                format!("Critically low (≤{})", t.critical_low),
            )
        } else if value <= t.low {
            (
                AnomalySeverity::Warning,
                Deviation::Low,
                format!("Low (≤{})", t.low),
            )
        } else if value >= t.critical_high {
            (
                AnomalySeverity::Critical,
                Deviation::High,
                format!("Critically high (≥{})", t.critical_high),
            )
        } else if value >= t.high {
            (
                AnomalySeverity::Warning,
                Deviation::High,
                format!("High (≥{})", t.high),
            )
        } else {
            return None;
        };

        Some(MedicalStatus {
            metric,
            value,
            unit: metric.unit().to_string(),
            severity,
            deviation,
            message,
        })
    }

    /// Runs both statistical detectors, merges their findings by index and
    /// classifies each flagged value. The latest value is also classified on
    /// its own, outlier or not.
    pub fn analyze_data(
        &self,
        data: &[f64],
        metric: MetricType,
        dates: Option<&[NaiveDate]>,
    ) -> AnomalyReport {
        let Some(&latest) = data.last() else {
            return AnomalyReport::no_data();
        };

        let mut flagged: BTreeMap<usize, Vec<DetectionMethod>> = BTreeMap::new();
        for a in self.detect_zscore(data) {
            flagged.entry(a.index).or_default().push(DetectionMethod::ZScore);
        }
        for a in self.detect_iqr(data) {
            flagged.entry(a.index).or_default().push(DetectionMethod::Iqr);
        }

        let anomalies: Vec<Anomaly> = flagged
            .into_iter()
            .map(|(index, detected_by)| {
                let value = data[index];
                let (severity, message) = match Self::detect_medical(value, metric) {
                    Some(status) => (status.severity, status.message),
                    None => (
                        AnomalySeverity::Warning,
                        "Statistical outlier".to_string(),
                    ),
                };
                Anomaly {
                    index,
                    value,
                    date: dates.and_then(|d| d.get(index)).copied(),
                    severity,
                    message,
                    detected_by,
                }
            })
            .collect();

        let latest_status = Self::detect_medical(latest, metric);
        let summary = summarize(metric, &anomalies, latest_status.as_ref());

        AnomalyReport {
            has_anomaly: !anomalies.is_empty(),
            anomaly_count: anomalies.len(),
            anomalies,
            latest_status,
            summary,
        }
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

fn summarize(
    metric: MetricType,
    anomalies: &[Anomaly],
    latest_status: Option<&MedicalStatus>,
) -> String {
    let name = metric.label();

    if anomalies.is_empty() && latest_status.is_none() {
        return format!("{} readings are normal, no anomalies found", name);
    }

    let mut parts = Vec::new();

    if let Some(status) = latest_status {
        let advice = match status.severity {
            AnomalySeverity::Critical => "seek medical attention immediately",
            AnomalySeverity::Warning => "keep monitoring",
        };
        parts.push(format!(
            "Current {} is {}, {}",
            name.to_lowercase(),
            status.message.to_lowercase(),
            advice
        ));
    }

    let critical = anomalies
        .iter()
        .filter(|a| a.severity == AnomalySeverity::Critical)
        .count();
    let warning = anomalies.len() - critical;

    if critical > 0 {
        parts.push(format!(
            "{} recently",
            plural(critical, "critical anomaly", "critical anomalies")
        ));
    }
    if warning > 0 {
        parts.push(plural(warning, "mild anomaly", "mild anomalies"));
    }

    parts.join("; ")
}
