//! Lactate threshold detection.
//!
//! Locates the aerobic threshold (LT1) from the first marked rise in blood
//! lactate, falling back to a fixed 2.0 mmol/L crossing, and the anaerobic
//! threshold (LT2) with the modified D-max method anchored on LT1.

use serde::{Deserialize, Serialize};

use super::error::{AnalyticsError, AnalyticsResult};

/// Minimum lactate rise (mmol/L) between consecutive steps that marks LT1.
pub const LACTATE_RISE_THRESHOLD: f64 = 0.3;

/// Fixed lactate level (mmol/L) used when no clear rise is found.
pub const FALLBACK_LACTATE_LEVEL: f64 = 2.0;

/// Minimum number of valid steps required to look for thresholds.
pub const MIN_STEPS_REQUIRED: usize = 3;

/// Slack for comparing differences of decimal-entered lactate values.
const RISE_TOLERANCE: f64 = 1e-9;

/// One fully measured step of an incremental test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredStep {
    /// 1-based position in the protocol as entered.
    pub step_number: u32,
    /// Workload (watts, km/h, ...).
    pub intensity: f64,
    /// Heart rate in bpm.
    pub heart_rate: u32,
    /// Blood lactate in mmol/L.
    pub lactate: f64,
}

impl MeasuredStep {
    pub fn new(step_number: u32, intensity: f64, heart_rate: u32, lactate: f64) -> Self {
        Self {
            step_number,
            intensity,
            heart_rate,
            lactate,
        }
    }

    fn to_point(self) -> ThresholdPoint {
        ThresholdPoint {
            intensity: self.intensity,
            heart_rate: self.heart_rate,
            lactate: self.lactate,
        }
    }
}

/// A measured or interpolated point on the lactate curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPoint {
    pub intensity: f64,
    pub heart_rate: u32,
    pub lactate: f64,
}

/// How LT1 was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lt1Method {
    /// Step before the first lactate rise above the rise threshold.
    Rise,
    /// Interpolated crossing of the fixed lactate level.
    FixedLevel,
}

/// Detected thresholds. `lt2` is only ever present alongside `lt1`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThresholdResult {
    pub lt1: Option<ThresholdPoint>,
    pub lt2: Option<ThresholdPoint>,
    /// Detection pass that produced `lt1`.
    #[serde(default)]
    pub lt1_method: Option<Lt1Method>,
}

impl ThresholdResult {
    /// A result with neither threshold.
    pub fn empty() -> Self {
        Self::default()
    }

    /// LT1, or an error when it could not be determined.
    pub fn require_lt1(&self) -> AnalyticsResult<ThresholdPoint> {
        self.lt1.ok_or(AnalyticsError::Lt1NotFound)
    }

    /// LT2, or an error when it could not be determined.
    pub fn require_lt2(&self) -> AnalyticsResult<ThresholdPoint> {
        self.lt2.ok_or(AnalyticsError::Lt2NotFound)
    }

    /// Both thresholds as a pair.
    pub fn require_both(&self) -> AnalyticsResult<(ThresholdPoint, ThresholdPoint)> {
        Ok((self.require_lt1()?, self.require_lt2()?))
    }
}

/// Threshold detector.
///
/// Rises are compared with a small tolerance, so a decimal rise of exactly
/// 0.3 (1.0 -> 1.3) does not mark LT1 even though the raw f64 difference is
/// 0.30000000000000004.
#[derive(Debug, Clone)]
pub struct ThresholdDetector {
    /// Rise between consecutive steps that marks LT1 (mmol/L).
    rise_threshold: f64,
    /// Lactate level used by the fallback pass (mmol/L).
    fallback_level: f64,
    /// Minimum number of steps before detection is attempted.
    min_steps: usize,
}

impl ThresholdDetector {
    /// Create with default settings.
    pub fn new() -> Self {
        Self {
            rise_threshold: LACTATE_RISE_THRESHOLD,
            fallback_level: FALLBACK_LACTATE_LEVEL,
            min_steps: MIN_STEPS_REQUIRED,
        }
    }

    /// Like [`calculate`](Self::calculate), but too few steps is an error.
    pub fn try_calculate(&self, steps: &[MeasuredStep]) -> AnalyticsResult<ThresholdResult> {
        if steps.len() < self.min_steps {
            return Err(AnalyticsError::InsufficientData(format!(
                "{} valid steps, need at least {}",
                steps.len(),
                self.min_steps
            )));
        }
        Ok(self.calculate(steps))
    }

    /// Detect LT1 and LT2 from the given steps, in any order.
    pub fn calculate(&self, steps: &[MeasuredStep]) -> ThresholdResult {
        if steps.len() < self.min_steps {
            tracing::debug!(
                steps = steps.len(),
                required = self.min_steps,
                "Not enough valid steps for threshold detection"
            );
            return ThresholdResult::empty();
        }

        let mut sorted = steps.to_vec();
        // Stable, so equal intensities keep input order.
        sorted.sort_by(|a, b| a.intensity.total_cmp(&b.intensity));

        let Some((lt1, method)) = self.detect_lt1(&sorted) else {
            tracing::debug!("No LT1 found: no lactate rise and no fixed-level crossing");
            return ThresholdResult::empty();
        };

        let lt2 = self.detect_lt2(&sorted, &lt1);
        if let Some(point) = &lt2 {
            tracing::debug!(
                intensity = point.intensity,
                lactate = point.lactate,
                "LT2 found by D-max"
            );
        }

        ThresholdResult {
            lt1: Some(lt1),
            lt2,
            lt1_method: Some(method),
        }
    }

    /// First-match LT1: rise scan, then fixed-level crossing.
    fn detect_lt1(&self, sorted: &[MeasuredStep]) -> Option<(ThresholdPoint, Lt1Method)> {
        if let Some(point) = self.detect_lt1_rise(sorted) {
            return Some((point, Lt1Method::Rise));
        }
        self.detect_lt1_fixed_level(sorted)
            .map(|point| (point, Lt1Method::FixedLevel))
    }

    /// The step before the first rise above the rise threshold.
    fn detect_lt1_rise(&self, sorted: &[MeasuredStep]) -> Option<ThresholdPoint> {
        sorted.windows(2).find_map(|pair| {
            let rise = pair[1].lactate - pair[0].lactate;
            // A rise of exactly 0.3 entered as decimals (1.2 -> 1.5) does not count.
            if rise > self.rise_threshold + RISE_TOLERANCE {
                tracing::debug!(
                    step = pair[0].step_number,
                    rise,
                    "LT1 found at step before lactate rise"
                );
                Some(pair[0].to_point())
            } else {
                None
            }
        })
    }

    /// Interpolated point where lactate first crosses the fallback level.
    fn detect_lt1_fixed_level(&self, sorted: &[MeasuredStep]) -> Option<ThresholdPoint> {
        let level = self.fallback_level;
        sorted.windows(2).find_map(|pair| {
            if pair[0].lactate < level && level <= pair[1].lactate {
                tracing::debug!(
                    from = pair[0].step_number,
                    to = pair[1].step_number,
                    level,
                    "LT1 interpolated at fixed lactate level"
                );
                Some(interpolate(&pair[0], &pair[1], level))
            } else {
                None
            }
        })
    }

    /// Modified D-max: the step after LT1 farthest from the LT1-to-peak line.
    fn detect_lt2(&self, sorted: &[MeasuredStep], lt1: &ThresholdPoint) -> Option<ThresholdPoint> {
        let last = sorted.last()?;
        let line = ((lt1.intensity, lt1.lactate), (last.intensity, last.lactate));

        let mut max_distance = 0.0;
        let mut lt2 = None;

        for step in sorted.iter().filter(|s| s.intensity > lt1.intensity) {
            let distance = perpendicular_distance((step.intensity, step.lactate), line.0, line.1);
            if distance > max_distance {
                max_distance = distance;
                lt2 = Some(step.to_point());
            }
        }

        lt2
    }
}

impl Default for ThresholdDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Perpendicular distance from `point` to the line through `a` and `b`.
///
/// Returns 0 when `a` and `b` coincide.
pub fn perpendicular_distance(point: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (x, y) = point;
    let (x1, y1) = a;
    let (x2, y2) = b;

    let coef_a = y2 - y1;
    let coef_b = x1 - x2;
    let coef_c = x2 * y1 - x1 * y2;

    let denominator = (coef_a * coef_a + coef_b * coef_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (coef_a * x + coef_b * y + coef_c).abs() / denominator
}

/// Linear interpolation between two steps at a target lactate value.
///
/// When both steps have the same lactate the earlier step is returned
/// unchanged, so the result's lactate may differ from `target`.
pub fn interpolate(prev: &MeasuredStep, curr: &MeasuredStep, target: f64) -> ThresholdPoint {
    let lactate_diff = curr.lactate - prev.lactate;
    if lactate_diff == 0.0 {
        return prev.to_point();
    }

    let ratio = (target - prev.lactate) / lactate_diff;
    let intensity = prev.intensity + (curr.intensity - prev.intensity) * ratio;
    let heart_rate =
        prev.heart_rate as f64 + (curr.heart_rate as f64 - prev.heart_rate as f64) * ratio;

    ThresholdPoint {
        intensity,
        heart_rate: heart_rate.round().max(0.0) as u32,
        lactate: target,
    }
}
