//! Per-metric scoring and the weighted composite health score.

use std::collections::BTreeMap;

use crate::constants::DEFAULT_HEALTH_SCORE;
use crate::metrics::MetricType;
use crate::trends::trends_model::{CompositeHealthScore, HealthCategory, HealthLevel, HealthMetrics};

/// Score of a value inside the optimal band.
const OPTIMAL_SCORE: f64 = 95.0;
/// Score at the outer edge of the normal band.
const NORMAL_FLOOR_SCORE: f64 = 70.0;
/// Span of scores inside the normal band.
const NORMAL_SPAN: f64 = 20.0;

/// Optimal and normal ranges of a metric, both inclusive.
#[derive(Debug, Clone, Copy)]
struct ScoreBands {
    optimal: (f64, f64),
    normal: (f64, f64),
}

const fn bands(optimal: (f64, f64), normal: (f64, f64)) -> ScoreBands {
    ScoreBands { optimal, normal }
}

static SCORE_BANDS: [(MetricType, ScoreBands); 8] = [
    (MetricType::HeartRate, bands((60.0, 80.0), (50.0, 100.0))),
    (MetricType::BloodPressureSys, bands((100.0, 120.0), (90.0, 140.0))),
    (MetricType::BloodPressureDia, bands((60.0, 80.0), (60.0, 90.0))),
    (MetricType::BloodSugar, bands((4.0, 5.5), (3.9, 6.1))),
    (MetricType::Spo2, bands((97.0, 100.0), (94.0, 100.0))),
    (MetricType::SleepDuration, bands((7.0, 8.0), (6.0, 9.0))),
    (MetricType::Steps, bands((8000.0, 12000.0), (5000.0, 15000.0))),
    (MetricType::Bmi, bands((18.5, 24.0), (18.5, 28.0))),
];

/// Scores individual metrics and blends them into one figure.
pub struct HealthScoreCalculator;

impl HealthScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Scores one value from 0 to 100 by its distance from the optimal band.
    ///
    /// Optimal values score 95. Values in the normal band score 70 to 90,
    /// rising towards the optimal edge. Values outside the normal band score
    /// 0 to 70. Metrics without bands score 70.
    pub fn calculate_metric_score(&self, value: f64, metric: MetricType) -> f64 {
        let Some(ScoreBands { optimal, normal }) = SCORE_BANDS
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, b)| *b)
        else {
            return f64::from(DEFAULT_HEALTH_SCORE);
        };

        if optimal.0 <= value && value <= optimal.1 {
            return OPTIMAL_SCORE;
        }

        if normal.0 <= value && value <= normal.1 {
            let ratio = if value < optimal.0 {
                (value - normal.0) / (optimal.0 - normal.0)
            } else {
                (normal.1 - value) / (normal.1 - optimal.1)
            };
            return NORMAL_FLOOR_SCORE + ratio * NORMAL_SPAN;
        }

        let ratio = if value < normal.0 {
            (value / normal.0).max(0.0)
        } else {
            (1.0 - (value - normal.1) / normal.1).max(0.0)
        };
        ratio * NORMAL_FLOOR_SCORE
    }

    /// Weighted average over the categories present in `metrics`.
    ///
    /// Weights are renormalised over the present categories. Blood pressure
    /// counts only when both readings are present.
    pub fn calculate_overall_score(&self, metrics: &HealthMetrics) -> CompositeHealthScore {
        let mut scored: Vec<(HealthCategory, f64)> = Vec::new();
        let mut add = |category: HealthCategory, score: f64| scored.push((category, score));

        if let Some(hr) = metrics.heart_rate {
            add(
                HealthCategory::HeartRate,
                self.calculate_metric_score(hr, MetricType::HeartRate),
            );
        }
        if let (Some(sys), Some(dia)) = (metrics.systolic_bp, metrics.diastolic_bp) {
            let sys_score = self.calculate_metric_score(sys, MetricType::BloodPressureSys);
            let dia_score = self.calculate_metric_score(dia, MetricType::BloodPressureDia);
            add(HealthCategory::BloodPressure, (sys_score + dia_score) / 2.0);
        }
        if let Some(sugar) = metrics.blood_sugar {
            add(
                HealthCategory::BloodSugar,
                self.calculate_metric_score(sugar, MetricType::BloodSugar),
            );
        }
        if let Some(sleep) = metrics.sleep_duration {
            add(
                HealthCategory::Sleep,
                self.calculate_metric_score(sleep, MetricType::SleepDuration),
            );
        }
        if let Some(steps) = metrics.steps {
            add(
                HealthCategory::Activity,
                self.calculate_metric_score(steps, MetricType::Steps),
            );
        }
        if let Some(spo2) = metrics.spo2 {
            add(
                HealthCategory::Spo2,
                self.calculate_metric_score(spo2, MetricType::Spo2),
            );
        }
        if let Some(bmi) = metrics.bmi {
            add(
                HealthCategory::Weight,
                self.calculate_metric_score(bmi, MetricType::Bmi),
            );
        }

        let total_weight: f64 = scored.iter().map(|(c, _)| c.weight()).sum();
        // Each weight is normalised first so a lone category contributes its score unchanged.
        let overall_score = if total_weight > 0.0 {
            let weighted: f64 = scored
                .iter()
                .map(|(c, score)| score * (c.weight() / total_weight))
                .sum();
            to_score(weighted)
        } else {
            DEFAULT_HEALTH_SCORE
        };
        let category_scores: BTreeMap<HealthCategory, u8> = scored
            .into_iter()
            .map(|(category, score)| (category, to_score(score)))
            .collect();
        let level = HealthLevel::from_score(overall_score);

        CompositeHealthScore {
            overall_score,
            category_scores,
            level,
            summary: level.summary().to_string(),
        }
    }
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

impl Default for HealthScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}
