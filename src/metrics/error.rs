//! Analytics error types.
//!
//! The detector and the zone partitioner never fail on their own; these
//! errors are for callers that need a missing threshold as an error value.

use thiserror::Error;

/// Errors that can occur when consuming threshold results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// Insufficient data to perform calculation.
    #[error("Not enough data: {0}")]
    InsufficientData(String),

    /// No aerobic threshold could be located.
    #[error("Could not determine LT1 (aerobic threshold)")]
    Lt1NotFound,

    /// No anaerobic threshold could be located.
    #[error("Could not determine LT2 (anaerobic threshold)")]
    Lt2NotFound,
}

impl AnalyticsError {
    /// Suggested next step for the athlete or coach.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalyticsError::InsufficientData(_) => {
                "Ensure you have at least 3 complete test steps with intensity, heart rate, and lactate values."
            }
            AnalyticsError::Lt1NotFound => {
                "Ensure lactate values show a clear rise during the test. Try testing at a wider range of intensities."
            }
            AnalyticsError::Lt2NotFound => {
                "Ensure the test reaches high enough intensity to show lactate accumulation."
            }
        }
    }
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
