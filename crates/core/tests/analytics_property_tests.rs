//! Property-based integration tests for the risk models and analyzers.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use healthpulse_core::metrics::MetricType;
use healthpulse_core::profile::Sex;
use healthpulse_core::risk::{
    CardiovascularRiskInput, DiabetesRiskInput, FamilyHistory, FindriscModel, FraminghamModel,
    MetabolicRiskInput, MetabolicSyndromeModel, RiskLevel, FINDRISC_MAX_SCORE,
};
use healthpulse_core::trends::{
    AnalyticsConfig, AnomalyDetector, HealthMetrics, HealthScoreCalculator, TrendAnalyzer,
    TrendDirection, MIN_TREND_POINTS,
};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

/// Generates a series of plausible heart rate readings.
fn arb_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(30.0f64..200.0, 0..=max_len)
}

fn arb_scored_metric() -> impl Strategy<Value = MetricType> {
    prop_oneof![
        Just(MetricType::HeartRate),
        Just(MetricType::BloodPressureSys),
        Just(MetricType::BloodPressureDia),
        Just(MetricType::BloodSugar),
        Just(MetricType::Spo2),
        Just(MetricType::SleepDuration),
        Just(MetricType::Steps),
        Just(MetricType::Bmi),
    ]
}

fn arb_cardiovascular_input() -> impl Strategy<Value = CardiovascularRiskInput> {
    (
        30u32..=79,
        arb_sex(),
        120.0f64..350.0, // total cholesterol
        20.0f64..100.0,  // hdl
        90.0f64..200.0,  // systolic
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(age, sex, tc, hdl, sbp, on_bp_medication, is_smoker, has_diabetes)| {
                CardiovascularRiskInput {
                    age,
                    sex,
                    total_cholesterol: tc,
                    hdl_cholesterol: hdl,
                    systolic_bp: sbp,
                    on_bp_medication,
                    is_smoker,
                    has_diabetes,
                }
            },
        )
}

fn arb_family_history() -> impl Strategy<Value = FamilyHistory> {
    prop_oneof![
        Just(FamilyHistory::None),
        Just(FamilyHistory::SecondDegree),
        Just(FamilyHistory::FirstDegree),
    ]
}

fn arb_diabetes_input() -> impl Strategy<Value = DiabetesRiskInput> {
    (
        (18u32..90, 15.0f64..45.0, 60.0f64..140.0, arb_sex()),
        (any::<bool>(), any::<bool>()), // bp medication, high glucose history
        (any::<bool>(), any::<bool>()), // physical activity, fruit and vegetables
        arb_family_history(),
    )
        .prop_map(
            |(
                (age, bmi, waist, sex),
                (on_bp_medication, history_high_glucose),
                (daily_physical_activity, daily_fruit_vegetable),
                family_diabetes,
            )| DiabetesRiskInput {
                age,
                bmi,
                waist_cm: waist,
                sex,
                on_bp_medication,
                history_high_glucose,
                daily_physical_activity,
                daily_fruit_vegetable,
                family_diabetes,
            },
        )
}

/// Generates the metrics of the composite score, each present or absent.
fn arb_health_metrics() -> impl Strategy<Value = HealthMetrics> {
    (
        (
            proptest::option::of(30.0f64..200.0),
            proptest::option::of(80.0f64..200.0),
            proptest::option::of(50.0f64..120.0),
            proptest::option::of(2.0f64..15.0),
        ),
        (
            proptest::option::of(2.0f64..12.0),
            proptest::option::of(0.0f64..25000.0),
            proptest::option::of(85.0f64..100.0),
            proptest::option::of(12.0f64..45.0),
        ),
    )
        .prop_map(
            |((heart_rate, systolic_bp, diastolic_bp, blood_sugar), (sleep, steps, spo2, bmi))| {
                HealthMetrics {
                    heart_rate,
                    systolic_bp,
                    diastolic_bp,
                    blood_sugar,
                    sleep_duration: sleep,
                    steps,
                    spo2,
                    bmi,
                }
            },
        )
}

fn arb_metabolic_input() -> impl Strategy<Value = MetabolicRiskInput> {
    (
        (60.0f64..130.0, arb_sex(), 50.0f64..400.0, 20.0f64..90.0),
        (90.0f64..180.0, 50.0f64..110.0, 3.5f64..9.0),
        (any::<bool>(), any::<bool>(), any::<bool>()),
    )
        .prop_map(
            |((waist, sex, tg, hdl), (sbp, dbp, glucose), (bp_med, lipid_med, glucose_med))| {
                MetabolicRiskInput {
                    waist_cm: waist,
                    sex,
                    triglycerides: tg,
                    hdl_cholesterol: hdl,
                    systolic_bp: sbp,
                    diastolic_bp: dbp,
                    fasting_glucose: glucose,
                    on_bp_medication: bp_med,
                    on_lipid_medication: lipid_med,
                    on_glucose_medication: glucose_med,
                }
            },
        )
}

// =============================================================================
// Risk model properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Valid Framingham inputs always produce a bounded, consistently tiered result.
    #[test]
    fn prop_framingham_result_is_bounded(input in arb_cardiovascular_input()) {
        let assessment = FraminghamModel::new().assess(&input);

        prop_assert!(assessment.risk_percentage >= 0.0);
        prop_assert!(assessment.risk_percentage <= 100.0);
        prop_assert!(assessment.result.score <= 100);
        prop_assert!(assessment.result.recommendations.len() <= 8);

        let expected = if assessment.risk_percentage < 10.0 {
            RiskLevel::Low
        } else if assessment.risk_percentage < 20.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        prop_assert_eq!(assessment.result.risk_level, expected);
    }

    /// Ages outside the model's domain are never scored.
    #[test]
    fn prop_framingham_rejects_out_of_range_age(
        input in arb_cardiovascular_input(),
        age in prop_oneof![0u32..30, 80u32..120],
    ) {
        let input = CardiovascularRiskInput { age, ..input };
        let assessment = FraminghamModel::new().assess(&input);
        prop_assert_eq!(assessment.result.risk_level, RiskLevel::Unknown);
        prop_assert_eq!(assessment.result.score, 0);
    }

    /// The FINDRISC total is the sum of its breakdown and never exceeds the maximum.
    #[test]
    fn prop_findrisc_total_matches_breakdown(input in arb_diabetes_input()) {
        let assessment = FindriscModel::new().assess(&input);

        let sum: u32 = assessment.breakdown.iter().map(|c| u32::from(c.points)).sum();
        prop_assert_eq!(sum, u32::from(assessment.total_score));
        prop_assert!(assessment.total_score <= FINDRISC_MAX_SCORE);
        prop_assert!(assessment.result.score <= 100);
    }

    /// Identical inputs always give identical assessments.
    #[test]
    fn prop_risk_models_are_deterministic(
        cardiovascular in arb_cardiovascular_input(),
        diabetes in arb_diabetes_input(),
        metabolic in arb_metabolic_input(),
    ) {
        prop_assert_eq!(
            FraminghamModel::new().assess(&cardiovascular),
            FraminghamModel::new().assess(&cardiovascular)
        );
        prop_assert_eq!(
            FindriscModel::new().assess(&diabetes),
            FindriscModel::new().assess(&diabetes)
        );
        prop_assert_eq!(
            MetabolicSyndromeModel::new().assess(&metabolic),
            MetabolicSyndromeModel::new().assess(&metabolic)
        );
    }

    /// The syndrome is present exactly when at least three criteria are met.
    #[test]
    fn prop_metabolic_diagnosis_matches_criteria(input in arb_metabolic_input()) {
        let assessment = MetabolicSyndromeModel::new().assess(&input);

        let met = assessment.criteria.iter().filter(|c| c.met).count();
        prop_assert_eq!(assessment.criteria.len(), 5);
        prop_assert_eq!(met, usize::from(assessment.criteria_met));
        prop_assert_eq!(assessment.has_metabolic_syndrome, met >= 3);
        prop_assert_eq!(assessment.result.score, assessment.criteria_met * 20);
        prop_assert!(assessment.result.recommendations.len() <= 8);
    }
}

// =============================================================================
// Analyzer properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The moving average keeps the input length and stays within the data range.
    #[test]
    fn prop_moving_average_is_bounded(data in arb_series(40), window in 1usize..15) {
        let averages = TrendAnalyzer::moving_average(&data, window);
        prop_assert_eq!(averages.len(), data.len());

        if !data.is_empty() {
            let min = data.iter().copied().fold(f64::INFINITY, f64::min);
            let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            for value in averages {
                prop_assert!(value >= min - 1e-9 && value <= max + 1e-9);
            }
        }
    }

    /// Short series are unknown; longer ones forecast exactly the configured horizon.
    #[test]
    fn prop_trend_forecast_length(data in arb_series(40), horizon in 1usize..14) {
        let config = AnalyticsConfig {
            forecast_horizon: horizon,
            ..Default::default()
        };
        let result = TrendAnalyzer::with_config(&config).analyze(&data, Some(MetricType::HeartRate));

        if data.len() < MIN_TREND_POINTS {
            prop_assert_eq!(result.direction, TrendDirection::Unknown);
            prop_assert!(result.forecast.is_empty());
        } else {
            prop_assert_ne!(result.direction, TrendDirection::Unknown);
            prop_assert_eq!(result.forecast.len(), horizon);
        }
        prop_assert_eq!(result.moving_average.len(), data.len());
    }

    /// A strictly increasing line with a clear slope is always rising.
    #[test]
    fn prop_increasing_line_is_rising(
        start in 0.0f64..200.0,
        slope in 0.2f64..10.0,
        len in 3usize..30,
    ) {
        let data: Vec<f64> = (0..len).map(|i| start + slope * i as f64).collect();
        let result = TrendAnalyzer::new().analyze(&data, None);
        prop_assert_eq!(result.direction, TrendDirection::Rising);
    }

    /// Anomalies are unique, in range and ordered by index.
    #[test]
    fn prop_anomaly_report_is_consistent(data in arb_series(40)) {
        let report = AnomalyDetector::new().analyze_data(&data, MetricType::HeartRate, None);

        prop_assert_eq!(report.anomaly_count, report.anomalies.len());
        prop_assert_eq!(report.has_anomaly, !report.anomalies.is_empty());
        for pair in report.anomalies.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
        for anomaly in &report.anomalies {
            prop_assert!(anomaly.index < data.len());
            prop_assert_eq!(anomaly.value, data[anomaly.index]);
            prop_assert!(!anomaly.detected_by.is_empty());
        }
    }

    /// A constant series has no statistical outliers.
    #[test]
    fn prop_constant_series_has_no_outliers(value in 30.0f64..200.0, len in 0usize..30) {
        let data = vec![value; len];
        let detector = AnomalyDetector::new();
        prop_assert!(detector.detect_zscore(&data).is_empty());
        prop_assert!(detector.detect_iqr(&data).is_empty());
    }

    /// Metric scores stay within 0..=100 for any non-negative value.
    #[test]
    fn prop_metric_score_is_bounded(metric in arb_scored_metric(), value in 0.0f64..50000.0) {
        let score = HealthScoreCalculator::new().calculate_metric_score(value, metric);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    /// With a single category present, the overall score is exactly that category's score.
    #[test]
    fn prop_single_category_overall_matches(metric in arb_scored_metric(), value in 0.0f64..20000.0) {
        let mut metrics = HealthMetrics::default();
        match metric {
            MetricType::HeartRate => metrics.heart_rate = Some(value),
            MetricType::BloodSugar => metrics.blood_sugar = Some(value),
            MetricType::Spo2 => metrics.spo2 = Some(value),
            MetricType::SleepDuration => metrics.sleep_duration = Some(value),
            MetricType::Steps => metrics.steps = Some(value),
            MetricType::Bmi => metrics.bmi = Some(value),
            _ => {
                metrics.systolic_bp = Some(value);
                metrics.diastolic_bp = Some(value);
            }
        }

        let score = HealthScoreCalculator::new().calculate_overall_score(&metrics);
        prop_assert_eq!(score.category_scores.len(), 1);
        let category = *score.category_scores.values().next().unwrap();
        prop_assert_eq!(score.overall_score, category);
    }

    /// Identical inputs always give identical trends, anomalies and scores.
    #[test]
    fn prop_analysis_is_deterministic(data in arb_series(40), metrics in arb_health_metrics()) {
        let analyzer = TrendAnalyzer::new();
        prop_assert_eq!(
            analyzer.analyze(&data, Some(MetricType::HeartRate)),
            analyzer.analyze(&data, Some(MetricType::HeartRate))
        );

        let detector = AnomalyDetector::new();
        prop_assert_eq!(
            detector.analyze_data(&data, MetricType::HeartRate, None),
            detector.analyze_data(&data, MetricType::HeartRate, None)
        );

        let calculator = HealthScoreCalculator::new();
        prop_assert_eq!(
            calculator.calculate_overall_score(&metrics),
            calculator.calculate_overall_score(&metrics)
        );
    }
}
