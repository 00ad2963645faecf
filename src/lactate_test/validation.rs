//! Range and progression checks for step test data.
//!
//! Runs before threshold detection. Out-of-range values, non-increasing
//! intensities and a too-narrow intensity span are errors; a low peak
//! lactate is only a warning.

use std::ops::RangeInclusive;

use thiserror::Error;

use super::types::{parse_decimal, parse_heart_rate, LactateTest, TestStep, TestType};
use crate::metrics::thresholds::MIN_STEPS_REQUIRED;

/// Validation ranges.
pub mod ranges {
    use std::ops::RangeInclusive;

    /// Watts.
    pub const CYCLING_INTENSITY: RangeInclusive<f64> = 50.0..=2500.0;
    /// km/h or min/km.
    pub const RUNNING_INTENSITY: RangeInclusive<f64> = 5.0..=50.0;
    /// bpm.
    pub const HEART_RATE: RangeInclusive<u32> = 30..=250;
    /// mmol/L.
    pub const LACTATE: RangeInclusive<f64> = 0.1..=30.0;
    /// Minimum difference between the lowest and highest intensity.
    pub const MINIMUM_INTENSITY_SPAN: f64 = 50.0;
    /// Peak lactate below this suggests the test stopped too early.
    pub const LOW_PEAK_LACTATE: f64 = 4.0;
}

/// A rule the test data breaks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Intensity {} is outside valid range ({})", whole(.value), whole_range(.range))]
    IntensityOutOfRange {
        value: f64,
        range: RangeInclusive<f64>,
    },

    #[error("Heart rate {value} is outside valid range ({} bpm)", bpm_range(.range))]
    HeartRateOutOfRange {
        value: u32,
        range: RangeInclusive<u32>,
    },

    #[error("Lactate {value:.1} is outside valid range ({} mmol/L)", decimal_range(.range))]
    LactateOutOfRange {
        value: f64,
        range: RangeInclusive<f64>,
    },

    #[error("Step {step_number} intensity should be higher than previous step")]
    IntensityNotIncreasing { step_number: usize },

    #[error("Need at least {required} valid steps (currently have {count})")]
    InsufficientSteps { count: usize, required: usize },

    #[error(
        "Intensity range ({}) too narrow. Need at least {} difference between lowest and highest.",
        whole(.range),
        whole(.minimum_required)
    )]
    InsufficientIntensityRange { range: f64, minimum_required: f64 },
}

fn whole(value: &f64) -> i64 {
    *value as i64
}

fn whole_range(range: &RangeInclusive<f64>) -> String {
    format!("{}-{}", whole(range.start()), whole(range.end()))
}

fn decimal_range(range: &RangeInclusive<f64>) -> String {
    format!("{:.1}-{:.1}", range.start(), range.end())
}

fn bpm_range(range: &RangeInclusive<u32>) -> String {
    format!("{}-{}", range.start(), range.end())
}

/// Outcome of validating a whole test.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validator for lactate step tests.
pub struct TestDataValidator;

impl TestDataValidator {
    /// Allowed intensity range for a sport.
    pub fn intensity_range(test_type: TestType) -> RangeInclusive<f64> {
        match test_type {
            TestType::Running => ranges::RUNNING_INTENSITY,
            TestType::Cycling | TestType::Other => ranges::CYCLING_INTENSITY,
        }
    }

    pub fn validate_intensity(value: f64, test_type: TestType) -> Option<ValidationError> {
        let range = Self::intensity_range(test_type);
        (!range.contains(&value)).then_some(ValidationError::IntensityOutOfRange { value, range })
    }

    pub fn validate_heart_rate(value: u32) -> Option<ValidationError> {
        (!ranges::HEART_RATE.contains(&value)).then_some(ValidationError::HeartRateOutOfRange {
            value,
            range: ranges::HEART_RATE,
        })
    }

    pub fn validate_lactate(value: f64) -> Option<ValidationError> {
        (!ranges::LACTATE.contains(&value)).then_some(ValidationError::LactateOutOfRange {
            value,
            range: ranges::LACTATE,
        })
    }

    /// Range errors for whichever values of a step are present.
    pub fn validate_step(step: &TestStep, test_type: TestType) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Some(error) = step.intensity_value().and_then(|v| Self::validate_intensity(v, test_type)) {
            errors.push(error);
        }
        if let Some(error) = step.heart_rate_value().and_then(Self::validate_heart_rate) {
            errors.push(error);
        }
        if let Some(error) = step.lactate_value().and_then(Self::validate_lactate) {
            errors.push(error);
        }

        errors
    }

    /// Validate every rule over the valid steps of a test.
    pub fn validate_test(test: &LactateTest) -> ValidationResult {
        let mut result = ValidationResult::default();
        let valid_steps = test.valid_steps();

        if valid_steps.len() < MIN_STEPS_REQUIRED {
            result.errors.push(ValidationError::InsufficientSteps {
                count: valid_steps.len(),
                required: MIN_STEPS_REQUIRED,
            });
        }

        for step in &valid_steps {
            result.errors.extend(Self::validate_step(step, test.test_type));
        }

        let intensities: Vec<f64> = valid_steps.iter().filter_map(|s| s.intensity_value()).collect();
        for (i, pair) in intensities.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                // Position among valid steps, 1-based
                result.errors.push(ValidationError::IntensityNotIncreasing { step_number: i + 2 });
            }
        }

        let min = intensities.iter().copied().reduce(f64::min);
        let max = intensities.iter().copied().reduce(f64::max);
        if let (Some(min), Some(max)) = (min, max) {
            let span = max - min;
            if span < ranges::MINIMUM_INTENSITY_SPAN {
                result.errors.push(ValidationError::InsufficientIntensityRange {
                    range: span,
                    minimum_required: ranges::MINIMUM_INTENSITY_SPAN,
                });
            }
        }

        let peak_lactate = valid_steps
            .iter()
            .filter_map(|s| s.lactate_value())
            .reduce(f64::max);
        if let Some(peak) = peak_lactate.filter(|p| *p < ranges::LOW_PEAK_LACTATE) {
            result.warnings.push(format!(
                "Maximum lactate is low ({:.1} mmol/L). Ensure test was completed at high enough intensity.",
                peak
            ));
        }

        for warning in &result.warnings {
            tracing::warn!(test_id = %test.id, "{}", warning);
        }
        if !result.is_valid() {
            tracing::debug!(test_id = %test.id, errors = result.errors.len(), "Test data failed validation");
        }

        result
    }

    pub fn is_valid_intensity(text: &str, test_type: TestType) -> bool {
        parse_decimal(text).is_some_and(|v| Self::validate_intensity(v, test_type).is_none())
    }

    pub fn is_valid_heart_rate(text: &str) -> bool {
        parse_heart_rate(text).is_some_and(|v| Self::validate_heart_rate(v).is_none())
    }

    pub fn is_valid_lactate(text: &str) -> bool {
        parse_decimal(text).is_some_and(|v| Self::validate_lactate(v).is_none())
    }
}
