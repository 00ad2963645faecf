//! Lactate step test data types.
//!
//! Steps keep the values exactly as entered so half-typed input survives
//! editing; parsed accessors decide whether a step takes part in analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::metrics::error::AnalyticsResult;
use crate::metrics::thresholds::{MeasuredStep, ThresholdDetector, ThresholdPoint, ThresholdResult};
use crate::metrics::zones::{self, TrainingZone, ZoneSystem};

/// Number of empty steps a new test starts with.
pub const DEFAULT_STEP_COUNT: usize = 5;

/// A test never has fewer rows than this.
pub const MIN_STEP_ROWS: usize = 3;

/// Parse a decimal number entered with either `.` or `,` as separator.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

/// Format a measured value with at least one fractional digit: `100.0`, `1.25`.
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Parse a whole-number heart rate.
pub fn parse_heart_rate(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Sport the test was performed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestType {
    #[default]
    Cycling,
    Running,
    Other,
}

impl TestType {
    pub fn all() -> [TestType; 3] {
        [TestType::Cycling, TestType::Running, TestType::Other]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TestType::Cycling => "Cycling",
            TestType::Running => "Running",
            TestType::Other => "Other",
        }
    }

    /// Unit label for step intensity.
    pub fn intensity_unit(&self) -> &'static str {
        match self {
            TestType::Cycling => "W",
            TestType::Running => "km/h",
            TestType::Other => "",
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cycling" => Ok(TestType::Cycling),
            "running" => Ok(TestType::Running),
            "other" => Ok(TestType::Other),
            other => Err(format!("Unknown test type: {}", other)),
        }
    }
}

/// One step of a test, as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestStep {
    /// Unique identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// 1-based position in the protocol
    pub step_number: u32,
    /// Intensity text (watts or km/h)
    #[serde(default)]
    pub intensity: String,
    /// Heart rate text (bpm)
    #[serde(default)]
    pub heart_rate: String,
    /// Lactate text (mmol/L)
    #[serde(default)]
    pub lactate: String,
}

impl TestStep {
    /// Create an empty step.
    pub fn new(step_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            step_number,
            intensity: String::new(),
            heart_rate: String::new(),
            lactate: String::new(),
        }
    }

    /// Create a step with all three values filled in.
    pub fn with_values(step_number: u32, intensity: &str, heart_rate: &str, lactate: &str) -> Self {
        Self {
            intensity: intensity.to_string(),
            heart_rate: heart_rate.to_string(),
            lactate: lactate.to_string(),
            ..Self::new(step_number)
        }
    }

    pub fn intensity_value(&self) -> Option<f64> {
        parse_decimal(&self.intensity)
    }

    pub fn heart_rate_value(&self) -> Option<u32> {
        parse_heart_rate(&self.heart_rate)
    }

    pub fn lactate_value(&self) -> Option<f64> {
        parse_decimal(&self.lactate)
    }

    /// Whether all three values parse.
    pub fn is_valid(&self) -> bool {
        self.measured().is_some()
    }

    /// Parsed step, or `None` if any value is missing or unparseable.
    pub fn measured(&self) -> Option<MeasuredStep> {
        Some(MeasuredStep::new(
            self.step_number,
            self.intensity_value()?,
            self.heart_rate_value()?,
            self.lactate_value()?,
        ))
    }

    /// Blank all values, keeping the step number.
    pub fn clear(&mut self) {
        self.intensity.clear();
        self.heart_rate.clear();
        self.lactate.clear();
    }
}

/// A complete lactate step test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LactateTest {
    /// Unique identifier
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// When the test was performed
    pub test_date: DateTime<Utc>,
    /// Sport
    #[serde(default)]
    pub test_type: TestType,
    /// Steps in entry order
    #[serde(default)]
    pub steps: Vec<TestStep>,
    #[serde(default)]
    pub lt1_intensity: Option<f64>,
    #[serde(default)]
    pub lt1_heart_rate: Option<u32>,
    #[serde(default)]
    pub lt1_lactate: Option<f64>,
    #[serde(default)]
    pub lt2_intensity: Option<f64>,
    #[serde(default)]
    pub lt2_heart_rate: Option<u32>,
    #[serde(default)]
    pub lt2_lactate: Option<f64>,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Sport name when `test_type` is `Other`
    #[serde(default)]
    pub custom_sport_name: String,
}

impl LactateTest {
    /// Create a test with no steps.
    pub fn new(test_date: DateTime<Utc>, test_type: TestType) -> Self {
        Self {
            id: Uuid::new_v4(),
            test_date,
            test_type,
            steps: Vec::new(),
            lt1_intensity: None,
            lt1_heart_rate: None,
            lt1_lactate: None,
            lt2_intensity: None,
            lt2_heart_rate: None,
            lt2_lactate: None,
            notes: String::new(),
            custom_sport_name: String::new(),
        }
    }

    /// Create a test with `count` empty steps numbered from 1.
    pub fn with_empty_steps(test_date: DateTime<Utc>, test_type: TestType, count: usize) -> Self {
        let mut test = Self::new(test_date, test_type);
        test.steps = (1..=count as u32).map(TestStep::new).collect();
        test
    }

    /// Append an empty step after the last one.
    pub fn add_step(&mut self) -> &mut TestStep {
        let number = self.steps.len() as u32 + 1;
        self.steps.push(TestStep::new(number));
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    /// Remove the step at `index` and renumber the rest.
    ///
    /// Returns the removed step, or `None` when the index is out of range or
    /// the test already has the minimum number of rows.
    pub fn delete_step(&mut self, index: usize) -> Option<TestStep> {
        if self.steps.len() <= MIN_STEP_ROWS || index >= self.steps.len() {
            return None;
        }
        let removed = self.steps.remove(index);
        self.renumber_steps();
        Some(removed)
    }

    fn renumber_steps(&mut self) {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.step_number = i as u32 + 1;
        }
    }

    /// Blank every step's values.
    pub fn clear_values(&mut self) {
        self.steps.iter_mut().for_each(TestStep::clear);
    }

    /// Steps with all three values present.
    pub fn valid_steps(&self) -> Vec<&TestStep> {
        self.steps.iter().filter(|s| s.is_valid()).collect()
    }

    /// Parsed valid steps in entry order.
    pub fn measured_steps(&self) -> Vec<MeasuredStep> {
        self.steps.iter().filter_map(TestStep::measured).collect()
    }

    pub fn can_calculate_thresholds(&self) -> bool {
        self.measured_steps().len() >= crate::metrics::thresholds::MIN_STEPS_REQUIRED
    }

    /// Run detection on the valid steps and store the result on the test.
    pub fn calculate_thresholds(&mut self) -> ThresholdResult {
        self.calculate_thresholds_with(&ThresholdDetector::new())
    }

    /// Run detection, failing when the test has too few valid steps.
    ///
    /// Stored thresholds are left untouched on error.
    pub fn try_calculate_thresholds(&mut self) -> AnalyticsResult<ThresholdResult> {
        let result = ThresholdDetector::new().try_calculate(&self.measured_steps())?;
        self.store_thresholds(&result);
        Ok(result)
    }

    /// Same as [`calculate_thresholds`](Self::calculate_thresholds) with a given detector.
    pub fn calculate_thresholds_with(&mut self, detector: &ThresholdDetector) -> ThresholdResult {
        let result = detector.calculate(&self.measured_steps());
        self.store_thresholds(&result);
        result
    }

    fn store_thresholds(&mut self, result: &ThresholdResult) {
        self.lt1_intensity = result.lt1.map(|p| p.intensity);
        self.lt1_heart_rate = result.lt1.map(|p| p.heart_rate);
        self.lt1_lactate = result.lt1.map(|p| p.lactate);

        self.lt2_intensity = result.lt2.map(|p| p.intensity);
        self.lt2_heart_rate = result.lt2.map(|p| p.heart_rate);
        self.lt2_lactate = result.lt2.map(|p| p.lactate);

        tracing::debug!(
            test_id = %self.id,
            lt1 = ?self.lt1_intensity,
            lt2 = ?self.lt2_intensity,
            "Thresholds stored on test"
        );
    }

    /// Stored thresholds as a result value.
    pub fn threshold_result(&self) -> ThresholdResult {
        let point = |intensity: Option<f64>, heart_rate: Option<u32>, lactate: Option<f64>| {
            Some(ThresholdPoint {
                intensity: intensity?,
                heart_rate: heart_rate?,
                lactate: lactate?,
            })
        };

        let lt1 = point(self.lt1_intensity, self.lt1_heart_rate, self.lt1_lactate);
        let lt2 = lt1.and(point(self.lt2_intensity, self.lt2_heart_rate, self.lt2_lactate));

        ThresholdResult {
            lt1,
            lt2,
            lt1_method: None,
        }
    }

    /// Highest heart rate among valid steps.
    pub fn max_heart_rate(&self) -> Option<u32> {
        self.measured_steps().iter().map(|s| s.heart_rate).max()
    }

    pub fn intensity_unit(&self) -> &'static str {
        self.test_type.intensity_unit()
    }

    /// Sport name for display, preferring the custom name for `Other`.
    pub fn sport_name(&self) -> &str {
        if self.test_type == TestType::Other && !self.custom_sport_name.trim().is_empty() {
            self.custom_sport_name.trim()
        } else {
            self.test_type.display_name()
        }
    }

    /// Intensity zones from the stored thresholds, if both are known.
    pub fn intensity_zones(&self, system: ZoneSystem) -> Option<Vec<TrainingZone>> {
        let lt1 = self.lt1_intensity?;
        let lt2 = self.lt2_intensity?;
        Some(zones::calculate_zones(lt1, lt2, system))
    }

    /// Heart rate zones from the stored thresholds.
    ///
    /// Without an explicit `max_hr` the maximum is estimated from LT2.
    pub fn heart_rate_zones(&self, system: ZoneSystem, max_hr: Option<u32>) -> Option<Vec<TrainingZone>> {
        let lt1 = self.lt1_heart_rate?;
        let lt2 = self.lt2_heart_rate?;
        let max = max_hr.unwrap_or_else(|| zones::estimate_max_heart_rate(lt2));
        Some(zones::heart_rate_zones(lt1, lt2, max, system))
    }
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty-printed JSON of the full test
    #[default]
    Json,
    /// CSV (spreadsheet compatible)
    Csv,
    /// Markdown report
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Errors during test export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export
    #[error("Test has no data to export")]
    NoData,

    /// Failed to write export data
    #[error("Failed to write data: {0}")]
    WriteFailed(String),

    /// Unsupported export format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Input file could not be parsed
    #[error("Failed to read test file: {0}")]
    ReadFailed(String),

    /// JSON encoding error
    #[error("Failed to encode data: {0}")]
    EncodingFailed(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
