//! Moving averages, least-squares regression and short-term forecasts.

use log::debug;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::metrics::MetricType;
use crate::trends::trends_model::{AnalyticsConfig, TrendDirection, TrendResult, TrendStrength};
use crate::utils::math_utils::{mean, round_to};

/// Minimum number of points needed to analyse a trend.
pub const MIN_TREND_POINTS: usize = 3;

/// |slope| below which a series is stable.
const STABLE_SLOPE: f64 = 0.1;
/// |slope| below which a trend is weak.
const MODERATE_SLOPE: f64 = 0.5;
/// |slope| at or above which a trend is strong.
const STRONG_SLOPE: f64 = 2.0;

/// Analyses the direction and strength of a metric history.
pub struct TrendAnalyzer {
    moving_average_window: usize,
    regression_window: usize,
    forecast_horizon: usize,
}

impl TrendAnalyzer {
    /// Creates an analyzer with the default windows (7-point average,
    /// 14-point regression, 7-step forecast).
    pub fn new() -> Self {
        Self::with_config(&AnalyticsConfig::default())
    }

    /// Creates an analyzer using the windows of `config`.
    pub fn with_config(config: &AnalyticsConfig) -> Self {
        Self {
            moving_average_window: config.moving_average_window.max(1),
            regression_window: config.regression_window.max(2),
            forecast_horizon: config.forecast_horizon,
        }
    }

    /// Trailing moving average, same length as the input.
    ///
    /// Points before the first full window average everything seen so far.
    pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
        let window = window.max(1);
        (0..data.len())
            .map(|i| {
                let start = (i + 1).saturating_sub(window);
                mean(&data[start..=i])
            })
            .collect()
    }

    /// Ordinary least squares of value against index. Returns `(slope, intercept)`.
    ///
    /// Fewer than two points yield a flat line through the mean (0 when empty).
    pub fn linear_regression(data: &[f64]) -> (f64, f64) {
        let n = data.len();
        if n < 2 {
            return (0.0, mean(data));
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = mean(data);

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, y) in data.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        if denominator == 0.0 {
            return (0.0, y_mean);
        }

        let slope = numerator / denominator;
        (slope, y_mean - slope * x_mean)
    }

    /// Extrapolates the regression line over the most recent points `steps` points ahead.
    ///
    /// With fewer than three points the last value is repeated (0 when empty).
    pub fn predict(&self, data: &[f64], steps: usize) -> Vec<f64> {
        if data.len() < MIN_TREND_POINTS {
            let last = data.last().copied().unwrap_or(0.0);
            return vec![last; steps];
        }

        let recent = self.recent(data);
        let (slope, intercept) = Self::linear_regression(recent);
        let n = recent.len();

        (0..steps)
            .map(|i| slope * (n + i) as f64 + intercept)
            .collect()
    }

    /// Classifies the history of `metric` and forecasts the next values.
    pub fn analyze(&self, data: &[f64], metric: Option<MetricType>) -> TrendResult {
        if data.len() < MIN_TREND_POINTS {
            debug!(
                "Trend analysis needs {} points, got {}",
                MIN_TREND_POINTS,
                data.len()
            );
            return TrendResult {
                direction: TrendDirection::Unknown,
                strength: TrendStrength::Unknown,
                change_rate_pct: 0.0,
                moving_average: data.to_vec(),
                forecast: Vec::new(),
                narrative: "Not enough data to analyze the trend".to_string(),
            };
        }

        let moving_average = Self::moving_average(data, self.moving_average_window);
        let (slope, _) = Self::linear_regression(self.recent(data));

        let first = data[0];
        let last = data[data.len() - 1];
        let change_rate = if first != 0.0 {
            (last - first) / first * 100.0
        } else {
            0.0
        };

        let direction = classify_direction(slope);
        let strength = classify_strength(slope);
        let forecast = self.predict(data, self.forecast_horizon);

        TrendResult {
            direction,
            strength,
            change_rate_pct: round_to(change_rate, 2),
            moving_average: moving_average
                .into_iter()
                .map(|v| round_to(v, DISPLAY_DECIMAL_PRECISION))
                .collect(),
            forecast: forecast
                .into_iter()
                .map(|v| round_to(v, DISPLAY_DECIMAL_PRECISION))
                .collect(),
            narrative: narrative(metric, direction, strength, change_rate),
        }
    }

    fn recent<'a>(&self, data: &'a [f64]) -> &'a [f64] {
        let start = data.len().saturating_sub(self.regression_window);
        &data[start..]
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_direction(slope: f64) -> TrendDirection {
    if slope.abs() < STABLE_SLOPE {
        TrendDirection::Stable
    } else if slope > 0.0 {
        TrendDirection::Rising
    } else {
        TrendDirection::Falling
    }
}

fn classify_strength(slope: f64) -> TrendStrength {
    let magnitude = slope.abs();
    if magnitude < MODERATE_SLOPE {
        TrendStrength::Weak
    } else if magnitude < STRONG_SLOPE {
        TrendStrength::Moderate
    } else {
        TrendStrength::Strong
    }
}

fn narrative(
    metric: Option<MetricType>,
    direction: TrendDirection,
    strength: TrendStrength,
    change_rate: f64,
) -> String {
    let name = metric.map(|m| m.label()).unwrap_or("This metric");
    let magnitude = change_rate.abs();

    match direction {
        TrendDirection::Stable => {
            format!("{} is essentially stable, changing {:.1}%", name, magnitude)
        }
        _ => {
            let change = match strength {
                TrendStrength::Strong => "a marked",
                TrendStrength::Moderate => "a slight",
                _ => "a minor",
            };
            format!(
                "{} is {} with {} change of {:.1}%",
                name,
                direction.as_str(),
                change,
                magnitude
            )
        }
    }
}
