//! Metrics module for threshold detection and training zones.

pub mod error;
pub mod thresholds;
pub mod trends;
pub mod zones;

pub use error::{AnalyticsError, AnalyticsResult};
pub use thresholds::{Lt1Method, MeasuredStep, ThresholdDetector, ThresholdPoint, ThresholdResult};
pub use trends::{summarize, TrendMetric, TrendSummary};
pub use zones::{
    calculate_zones, estimate_max_heart_rate, find_zone, heart_rate_zones, TrainingZone, ZoneColor,
    ZoneSystem,
};
