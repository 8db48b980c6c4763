//! Trend service implementation.
//!
//! Loads metric histories, device readings and daily summaries through the
//! repository traits and runs the analyzers over them.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::analyzers::{AnomalyDetector, HealthScoreCalculator, TrendAnalyzer};
use super::trends_model::{
    AnalyticsConfig, AnomalySeverity, CompositeHealthScore, HealthLevel, HealthMetrics,
    TrendDirection,
};
use super::trends_reports::{
    ActivityTrendReport, AnalysisAnomaly, AnomalySource, ComprehensiveAnalysis, DailyAggregate,
    DeviceTrendReport, ForecastSeries, HealthScoreReport, MetricTrendReport, SleepAnomaly,
    SleepAnomalyKind, SleepTrendReport,
};
use super::trends_traits::{
    DailySummaryRepositoryTrait, MetricHistoryRepositoryTrait, TrendServiceTrait,
};
use crate::constants::{
    DEFAULT_HEALTH_SCORE, DISPLAY_DECIMAL_PRECISION, MAX_ANALYSIS_ANOMALIES,
    MAX_ANALYSIS_RECOMMENDATIONS,
};
use crate::errors::Result;
use crate::metrics::{
    evaluate_reading, latest_change, DailyHealthSummary, MetricType, TimeSeriesSample,
};
use crate::profile::HealthProfileRepositoryTrait;
use crate::utils::math_utils::{mean, round_to, SeriesStatistics};
use crate::utils::time_utils::{get_following_days, window_start, window_start_date};

/// Window of the comprehensive analysis, in days.
const ANALYSIS_WINDOW_DAYS: u32 = 7;

// Sleep thresholds
const SHORT_SLEEP_HOURS: f64 = 5.0;
const FREQUENT_WAKE_COUNT: u32 = 5;
const SUFFICIENT_SLEEP_HOURS: f64 = 7.0;
const MIN_SLEEP_HOURS: f64 = 6.0;
const GOOD_SLEEP_QUALITY: f64 = 80.0;
const FAIR_SLEEP_QUALITY: f64 = 60.0;

// Activity thresholds
const VERY_ACTIVE_STEPS: f64 = 10000.0;
const MODERATELY_ACTIVE_STEPS: f64 = 6000.0;
const LOW_ACTIVITY_STEPS: f64 = 5000.0;
const LOW_GOAL_REACH_RATE: f64 = 50.0;

// Assumed when a window has no sleep summary
const DEFAULT_SLEEP_HOURS: f64 = 7.0;
const DEFAULT_SLEEP_QUALITY: f64 = 70.0;

const LOW_HEALTH_SCORE: u8 = 60;
const FREQUENT_HEART_RATE_ANOMALIES: usize = 3;

/// Service for trend analysis over a user's recorded health data.
pub struct TrendService {
    metric_repository: Arc<dyn MetricHistoryRepositoryTrait>,
    summary_repository: Arc<dyn DailySummaryRepositoryTrait>,
    profile_repository: Arc<dyn HealthProfileRepositoryTrait>,
    config: RwLock<AnalyticsConfig>,
    score_calculator: HealthScoreCalculator,
}

impl TrendService {
    /// Creates a new TrendService instance with the default configuration
    pub fn new(
        metric_repository: Arc<dyn MetricHistoryRepositoryTrait>,
        summary_repository: Arc<dyn DailySummaryRepositoryTrait>,
        profile_repository: Arc<dyn HealthProfileRepositoryTrait>,
    ) -> Self {
        Self::with_config(
            metric_repository,
            summary_repository,
            profile_repository,
            AnalyticsConfig::default(),
        )
    }

    /// Creates a trend service with custom configuration.
    pub fn with_config(
        metric_repository: Arc<dyn MetricHistoryRepositoryTrait>,
        summary_repository: Arc<dyn DailySummaryRepositoryTrait>,
        profile_repository: Arc<dyn HealthProfileRepositoryTrait>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            metric_repository,
            summary_repository,
            profile_repository,
            config: RwLock::new(config),
            score_calculator: HealthScoreCalculator::new(),
        }
    }

    async fn latest_value(&self, user_id: &str, metric: MetricType) -> Result<Option<f64>> {
        Ok(self
            .metric_repository
            .get_latest_metric(user_id, metric)
            .await?
            .map(|sample| sample.value))
    }

    async fn summaries_since(
        &self,
        user_id: &str,
        days: u32,
    ) -> Result<Vec<DailyHealthSummary>> {
        let since = window_start_date(Utc::now().date_naive(), days);
        self.summary_repository
            .get_daily_summaries(user_id, since)
            .await
    }
}

#[async_trait]
impl TrendServiceTrait for TrendService {
    async fn get_config(&self) -> AnalyticsConfig {
        self.config.read().await.clone()
    }

    async fn update_config(&self, config: AnalyticsConfig) -> Result<()> {
        config.validate()?;
        *self.config.write().await = config;
        info!("Analytics configuration updated");
        Ok(())
    }

    async fn get_metric_trend(
        &self,
        user_id: &str,
        metric: MetricType,
        days: Option<u32>,
    ) -> Result<MetricTrendReport> {
        let config = self.config.read().await.clone();
        let days = days.unwrap_or(config.default_trend_days);
        let since = window_start(Utc::now(), days);

        let samples = self
            .metric_repository
            .get_metric_history(user_id, metric, since)
            .await?;
        debug!(
            "Analyzing {} {} samples over {} days",
            samples.len(),
            metric.as_str(),
            days
        );

        Ok(metric_trend_report(&samples, metric, days, &config))
    }

    async fn get_device_trend(
        &self,
        user_id: &str,
        metric: MetricType,
        days: Option<u32>,
    ) -> Result<DeviceTrendReport> {
        let config = self.config.read().await.clone();
        let days = days.unwrap_or(config.device_trend_days);
        let since = window_start(Utc::now(), days);

        let readings = self
            .metric_repository
            .get_device_readings(user_id, metric, since)
            .await?;
        debug!(
            "Aggregating {} {} device readings over {} days",
            readings.len(),
            metric.as_str(),
            days
        );

        Ok(device_trend_report(&readings, metric, days, &config))
    }

    async fn get_sleep_trend(
        &self,
        user_id: &str,
        days: Option<u32>,
    ) -> Result<Option<SleepTrendReport>> {
        let config = self.config.read().await.clone();
        let days = days.unwrap_or(config.sleep_trend_days);
        let summaries = self.summaries_since(user_id, days).await?;
        Ok(sleep_trend_report(&summaries, days, &config))
    }

    async fn get_activity_trend(
        &self,
        user_id: &str,
        days: Option<u32>,
    ) -> Result<Option<ActivityTrendReport>> {
        let config = self.config.read().await.clone();
        let days = days.unwrap_or(config.activity_trend_days);
        let summaries = self.summaries_since(user_id, days).await?;
        Ok(activity_trend_report(&summaries, days, &config))
    }

    async fn get_health_score(&self, user_id: &str) -> Result<HealthScoreReport> {
        let mut metrics = HealthMetrics {
            heart_rate: self.latest_value(user_id, MetricType::HeartRate).await?,
            systolic_bp: self
                .latest_value(user_id, MetricType::BloodPressureSys)
                .await?,
            diastolic_bp: self
                .latest_value(user_id, MetricType::BloodPressureDia)
                .await?,
            blood_sugar: self.latest_value(user_id, MetricType::BloodSugar).await?,
            ..Default::default()
        };

        if let Some(summary) = self
            .summary_repository
            .get_latest_daily_summary(user_id)
            .await?
        {
            if metrics.heart_rate.is_none() {
                metrics.heart_rate = recorded(summary.avg_heart_rate);
            }
            metrics.steps = recorded(summary.total_steps.map(f64::from));
            metrics.sleep_duration = recorded(summary.sleep_duration);
            metrics.spo2 = recorded(summary.avg_spo2);
        }

        metrics.bmi = recorded(
            self.profile_repository
                .get_health_profile(user_id)
                .await?
                .and_then(|profile| profile.effective_bmi()),
        );

        Ok(health_score_report(&self.score_calculator, metrics))
    }

    async fn get_comprehensive_analysis(&self, user_id: &str) -> Result<ComprehensiveAnalysis> {
        let config = self.config.read().await.clone();
        let now = Utc::now();

        let health_score = self.get_health_score(user_id).await?;

        let readings = self
            .metric_repository
            .get_device_readings(
                user_id,
                MetricType::HeartRate,
                window_start(now, ANALYSIS_WINDOW_DAYS),
            )
            .await?;
        let heart_rate = device_trend_report(
            &readings,
            MetricType::HeartRate,
            ANALYSIS_WINDOW_DAYS,
            &config,
        );

        let summaries = self
            .summary_repository
            .get_daily_summaries(
                user_id,
                window_start_date(now.date_naive(), ANALYSIS_WINDOW_DAYS),
            )
            .await?;
        let sleep = sleep_trend_report(&summaries, ANALYSIS_WINDOW_DAYS, &config);
        let activity = activity_trend_report(&summaries, ANALYSIS_WINDOW_DAYS, &config);

        let mut anomalies: Vec<AnalysisAnomaly> = heart_rate
            .anomalies
            .anomalies
            .iter()
            .map(|a| AnalysisAnomaly {
                source: AnomalySource::HeartRate,
                date: a.date,
                value: a.value,
                severity: a.severity,
                message: a.message.clone(),
            })
            .collect();
        if let Some(sleep) = &sleep {
            anomalies.extend(sleep.anomalies.iter().map(|a| AnalysisAnomaly {
                source: AnomalySource::Sleep,
                date: Some(a.date),
                value: a.value,
                severity: AnomalySeverity::Warning,
                message: a.message.clone(),
            }));
        }
        let anomaly_count = anomalies.len();
        anomalies.truncate(MAX_ANALYSIS_ANOMALIES);

        let recommendations = analysis_recommendations(
            health_score.score.overall_score,
            heart_rate.anomalies.anomaly_count,
            sleep.as_ref(),
            activity.as_ref(),
            config.daily_step_goal,
        );

        info!(
            "Comprehensive analysis for user {}: score {}, {} anomalies",
            user_id, health_score.score.overall_score, anomaly_count
        );

        Ok(ComprehensiveAnalysis {
            user_id: user_id.to_string(),
            health_score,
            heart_rate,
            sleep,
            activity,
            anomalies,
            anomaly_count,
            recommendations,
            generated_at: now,
        })
    }
}

// =============================================================================
// Report builders
// =============================================================================

/// Summary and profile fields store 0 when nothing was synced.
fn recorded(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn metric_trend_report(
    samples: &[TimeSeriesSample],
    metric: MetricType,
    days: u32,
    config: &AnalyticsConfig,
) -> MetricTrendReport {
    if samples.is_empty() {
        return MetricTrendReport::empty(metric, days);
    }

    let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    let dates: Vec<NaiveDate> = samples.iter().map(TimeSeriesSample::date).collect();

    let trend = TrendAnalyzer::with_config(config).analyze(&values, Some(metric));
    let anomalies =
        AnomalyDetector::with_config(config).analyze_data(&values, metric, Some(&dates));

    let forecast = forecast_series(&trend.forecast, dates.last().copied());

    let latest_value = values.last().copied();

    MetricTrendReport {
        metric,
        days,
        statistics: SeriesStatistics::describe(&values),
        latest_status: latest_value.map(|v| evaluate_reading(metric, v)),
        latest_change: latest_change(&values),
        latest_value,
        values,
        dates,
        trend,
        anomalies,
        forecast,
    }
}

/// Dates the forecast values on the days following `last`.
fn forecast_series(values: &[f64], last: Option<NaiveDate>) -> ForecastSeries {
    ForecastSeries {
        values: values.to_vec(),
        dates: last
            .map(|last| get_following_days(last, values.len()))
            .unwrap_or_default(),
    }
}

/// Groups readings by calendar day, ascending.
fn group_by_day(readings: &[TimeSeriesSample]) -> Vec<DailyAggregate> {
    let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for reading in readings {
        by_day.entry(reading.date()).or_default().push(reading.value);
    }

    by_day
        .into_iter()
        .map(|(date, values)| DailyAggregate {
            date,
            average: round_to(mean(&values), DISPLAY_DECIMAL_PRECISION),
            min: round_to(
                values.iter().copied().fold(f64::INFINITY, f64::min),
                DISPLAY_DECIMAL_PRECISION,
            ),
            max: round_to(
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                DISPLAY_DECIMAL_PRECISION,
            ),
            count: values.len(),
        })
        .collect()
}

fn device_trend_report(
    readings: &[TimeSeriesSample],
    metric: MetricType,
    days: u32,
    config: &AnalyticsConfig,
) -> DeviceTrendReport {
    let daily = group_by_day(readings);
    if daily.is_empty() {
        return DeviceTrendReport::empty(metric, days);
    }

    let averages: Vec<f64> = daily.iter().map(|d| d.average).collect();
    let dates: Vec<NaiveDate> = daily.iter().map(|d| d.date).collect();

    let trend = TrendAnalyzer::with_config(config).analyze(&averages, Some(metric));
    let forecast = forecast_series(&trend.forecast, dates.last().copied());

    DeviceTrendReport {
        metric,
        days,
        anomalies: AnomalyDetector::with_config(config).analyze_data(
            &averages,
            metric,
            Some(&dates),
        ),
        statistics: SeriesStatistics::describe(&averages),
        daily,
        trend,
        forecast,
    }
}

fn sleep_anomalies(summaries: &[DailyHealthSummary]) -> Vec<SleepAnomaly> {
    let mut anomalies = Vec::new();
    for summary in summaries {
        if let Some(hours) = summary.sleep_duration {
            if hours < SHORT_SLEEP_HOURS {
                anomalies.push(SleepAnomaly {
                    date: summary.date,
                    kind: SleepAnomalyKind::ShortSleep,
                    value: hours,
                    message: format!("Sleep too short ({:.1}h)", hours),
                });
            }
        }
        if let Some(count) = summary.awake_count {
            if count > FREQUENT_WAKE_COUNT {
                anomalies.push(SleepAnomaly {
                    date: summary.date,
                    kind: SleepAnomalyKind::FrequentWake,
                    value: f64::from(count),
                    message: format!("Too many awakenings ({})", count),
                });
            }
        }
    }
    anomalies
}

fn sleep_summary(avg_duration: f64, avg_quality: f64, anomaly_count: usize) -> String {
    let duration_note = if avg_duration >= SUFFICIENT_SLEEP_HOURS {
        "sufficient"
    } else if avg_duration >= MIN_SLEEP_HOURS {
        "slightly short"
    } else {
        "insufficient"
    };
    let quality_note = if avg_quality >= GOOD_SLEEP_QUALITY {
        "good"
    } else if avg_quality >= FAIR_SLEEP_QUALITY {
        "fair"
    } else {
        "poor"
    };

    let mut parts = vec![
        format!("Average sleep {:.1}h, {}", avg_duration, duration_note),
        format!("sleep quality is {}", quality_note),
    ];
    match anomaly_count {
        0 => {}
        1 => parts.push("1 sleep anomaly".to_string()),
        n => parts.push(format!("{} sleep anomalies", n)),
    }
    parts.join("; ")
}

fn sleep_trend_report(
    summaries: &[DailyHealthSummary],
    days: u32,
    config: &AnalyticsConfig,
) -> Option<SleepTrendReport> {
    if summaries.is_empty() {
        return None;
    }

    let dates: Vec<NaiveDate> = summaries.iter().map(|s| s.date).collect();
    let durations: Vec<f64> = summaries
        .iter()
        .map(|s| s.sleep_duration.unwrap_or(0.0))
        .collect();
    let quality_scores: Vec<f64> = summaries
        .iter()
        .map(|s| s.sleep_quality_score.unwrap_or(0.0))
        .collect();
    let deep: Vec<f64> = summaries
        .iter()
        .map(|s| s.deep_sleep_duration.unwrap_or(0.0))
        .collect();

    let analyzer = TrendAnalyzer::with_config(config);
    let duration_trend = analyzer.analyze(&durations, Some(MetricType::SleepDuration));
    let quality_trend = analyzer.analyze(&quality_scores, Some(MetricType::SleepQuality));

    let anomalies = sleep_anomalies(summaries);

    let avg_duration = round_to(mean(&durations), 1);
    let avg_quality = mean(&quality_scores).round();
    let avg_deep_sleep = round_to(mean(&deep), 1);
    let deep_sleep_ratio = if avg_duration > 0.0 {
        round_to(avg_deep_sleep / avg_duration * 100.0, 1)
    } else {
        0.0
    };

    Some(SleepTrendReport {
        days,
        summary: sleep_summary(avg_duration, avg_quality, anomalies.len()),
        dates,
        durations,
        quality_scores,
        duration_trend,
        quality_trend,
        anomalies,
        avg_duration,
        avg_quality,
        avg_deep_sleep,
        deep_sleep_ratio,
    })
}

fn activity_summary(avg_steps: f64, goal_reach_rate: f64, direction: TrendDirection) -> String {
    let level = if avg_steps >= VERY_ACTIVE_STEPS {
        "Very active"
    } else if avg_steps >= MODERATELY_ACTIVE_STEPS {
        "Moderately active"
    } else {
        "Needs more movement"
    };

    let mut parts = vec![
        format!("{}, averaging {:.0} steps a day", level, avg_steps),
        format!("step goal reached on {:.1}% of days", goal_reach_rate),
    ];
    match direction {
        TrendDirection::Rising => parts.push("activity is trending up".to_string()),
        TrendDirection::Falling => parts.push("activity is trending down".to_string()),
        _ => {}
    }
    parts.join("; ")
}

fn activity_trend_report(
    summaries: &[DailyHealthSummary],
    days: u32,
    config: &AnalyticsConfig,
) -> Option<ActivityTrendReport> {
    if summaries.is_empty() {
        return None;
    }

    let dates: Vec<NaiveDate> = summaries.iter().map(|s| s.date).collect();
    let steps: Vec<f64> = summaries
        .iter()
        .map(|s| s.total_steps.map(f64::from).unwrap_or(0.0))
        .collect();
    let calories: Vec<f64> = summaries
        .iter()
        .map(|s| s.calories_burned.unwrap_or(0.0))
        .collect();
    let active_minutes: Vec<f64> = summaries
        .iter()
        .map(|s| s.active_minutes.map(f64::from).unwrap_or(0.0))
        .collect();
    let distance_km: Vec<f64> = summaries
        .iter()
        .map(|s| s.distance_km.unwrap_or(0.0))
        .collect();

    let steps_trend =
        TrendAnalyzer::with_config(config).analyze(&steps, Some(MetricType::Steps));

    let goal = f64::from(config.daily_step_goal);
    let goal_reached_days = steps.iter().filter(|s| **s >= goal).count();
    let goal_reach_rate = round_to(goal_reached_days as f64 / steps.len() as f64 * 100.0, 1);

    let avg_steps = mean(&steps).round();
    let max_steps = steps.iter().copied().fold(0.0, f64::max);

    Some(ActivityTrendReport {
        days,
        summary: activity_summary(avg_steps, goal_reach_rate, steps_trend.direction),
        dates,
        daily_step_goal: config.daily_step_goal,
        goal_reached_days,
        goal_reach_rate,
        avg_steps,
        max_steps,
        avg_calories: round_to(mean(&calories), 1),
        avg_active_minutes: mean(&active_minutes).round(),
        avg_distance_km: round_to(mean(&distance_km), 2),
        steps,
        calories,
        active_minutes,
        distance_km,
        steps_trend,
    })
}

fn health_score_report(
    calculator: &HealthScoreCalculator,
    metrics: HealthMetrics,
) -> HealthScoreReport {
    if metrics.is_empty() {
        debug!("No metrics available, returning the default health score");
        let level = HealthLevel::Unknown;
        return HealthScoreReport {
            score: CompositeHealthScore {
                overall_score: DEFAULT_HEALTH_SCORE,
                category_scores: BTreeMap::new(),
                level,
                summary: level.summary().to_string(),
            },
            metrics_used: Vec::new(),
            metrics,
            data_sufficient: false,
        };
    }

    HealthScoreReport {
        score: calculator.calculate_overall_score(&metrics),
        metrics_used: metrics.metrics_used(),
        metrics,
        data_sufficient: true,
    }
}

fn analysis_recommendations(
    overall_score: u8,
    heart_rate_anomalies: usize,
    sleep: Option<&SleepTrendReport>,
    activity: Option<&ActivityTrendReport>,
    daily_step_goal: u32,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if overall_score < LOW_HEALTH_SCORE {
        recommendations.push(
            "Your health score is low, consider a full medical check-up".to_string(),
        );
    }

    let avg_sleep = sleep.map_or(DEFAULT_SLEEP_HOURS, |s| s.avg_duration);
    let sleep_quality = sleep.map_or(DEFAULT_SLEEP_QUALITY, |s| s.avg_quality);
    if avg_sleep < MIN_SLEEP_HOURS {
        recommendations.push("Aim for 7 to 8 hours of sleep each night".to_string());
    }
    if sleep_quality < FAIR_SLEEP_QUALITY {
        recommendations.push(
            "Improve sleep quality with a regular bedtime and less screen time before sleep"
                .to_string(),
        );
    }

    let avg_steps = activity.map_or(0.0, |a| a.avg_steps);
    let goal_reach_rate = activity.map_or(0.0, |a| a.goal_reach_rate);
    if avg_steps < LOW_ACTIVITY_STEPS {
        recommendations.push(format!(
            "Increase your daily activity, aim for {} steps a day",
            daily_step_goal
        ));
    }
    if goal_reach_rate < LOW_GOAL_REACH_RATE {
        recommendations
            .push("Set a smaller daily step target and build up gradually".to_string());
    }

    if heart_rate_anomalies > FREQUENT_HEART_RATE_ANOMALIES {
        recommendations.push(
            "Several unusual heart rate readings were found, consider consulting a doctor"
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations
            .push("Your indicators look good, keep up your healthy habits".to_string());
    }
    recommendations.push("Have regular health check-ups".to_string());

    recommendations.truncate(MAX_ANALYSIS_RECOMMENDATIONS);
    recommendations
}
