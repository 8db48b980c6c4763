/// Maximum number of recommendations a risk model returns
pub const MAX_RISK_RECOMMENDATIONS: usize = 8;

/// Maximum number of recommendations in a comprehensive analysis
pub const MAX_ANALYSIS_RECOMMENDATIONS: usize = 6;

/// Maximum number of anomalies listed in a comprehensive analysis
pub const MAX_ANALYSIS_ANOMALIES: usize = 10;

/// Score used when nothing can be measured
pub const DEFAULT_HEALTH_SCORE: u8 = 70;

/// Decimal precision for displayed measurement values
pub const DISPLAY_DECIMAL_PRECISION: u32 = 1;

/// Fasting glucose (mmol/L) at or above which the history of high glucose is assumed
pub const HIGH_FASTING_GLUCOSE: f64 = 5.6;
