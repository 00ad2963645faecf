//! Unit tests for test data validation.

use chrono::Utc;
use lactate_zones::lactate_test::{
    LactateTest, TestDataValidator, TestStep, TestType, ValidationError,
};

fn cycling_test(rows: &[(&str, &str, &str)]) -> LactateTest {
    let mut test = LactateTest::new(Utc::now(), TestType::Cycling);
    test.steps = rows
        .iter()
        .enumerate()
        .map(|(i, (intensity, hr, lactate))| TestStep::with_values(i as u32 + 1, intensity, hr, lactate))
        .collect();
    test
}

#[test]
fn test_complete_test_is_valid() {
    let test = cycling_test(&[
        ("100", "120", "1.0"),
        ("150", "140", "1.2"),
        ("200", "160", "2.7"),
        ("250", "175", "5.0"),
    ]);

    let result = TestDataValidator::validate_test(&test);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_too_few_valid_steps() {
    let mut test = cycling_test(&[("100", "120", "1.0"), ("200", "160", "4.2")]);
    test.add_step();

    let result = TestDataValidator::validate_test(&test);
    assert!(result
        .errors
        .contains(&ValidationError::InsufficientSteps { count: 2, required: 3 }));
}

#[test]
fn test_non_increasing_intensity() {
    let test = cycling_test(&[
        ("100", "120", "1.0"),
        ("200", "140", "1.5"),
        ("200", "150", "2.5"),
        ("250", "170", "5.0"),
    ]);

    let result = TestDataValidator::validate_test(&test);
    assert_eq!(
        result.errors,
        vec![ValidationError::IntensityNotIncreasing { step_number: 3 }]
    );
    assert_eq!(
        result.errors[0].to_string(),
        "Step 3 intensity should be higher than previous step"
    );
}

#[test]
fn test_narrow_intensity_span() {
    let test = cycling_test(&[("100", "120", "1.0"), ("110", "130", "2.0"), ("120", "140", "4.5")]);

    let result = TestDataValidator::validate_test(&test);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].to_string(),
        "Intensity range (20) too narrow. Need at least 50 difference between lowest and highest."
    );
}

#[test]
fn test_values_out_of_range() {
    let test = cycling_test(&[
        ("20", "120", "1.0"),
        ("150", "300", "1.5"),
        ("250", "170", "45"),
    ]);

    let result = TestDataValidator::validate_test(&test);
    let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();

    assert!(messages.contains(&"Intensity 20 is outside valid range (50-2500)".to_string()));
    assert!(messages.contains(&"Heart rate 300 is outside valid range (30-250 bpm)".to_string()));
    assert!(messages.contains(&"Lactate 45.0 is outside valid range (0.1-30.0 mmol/L)".to_string()));
}

#[test]
fn test_low_peak_lactate_warns() {
    let test = cycling_test(&[("100", "120", "1.0"), ("150", "140", "1.8"), ("200", "160", "3.2")]);

    let result = TestDataValidator::validate_test(&test);
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("3.2 mmol/L"));
}

#[test]
fn test_running_uses_speed_range() {
    assert!(TestDataValidator::is_valid_intensity("12,5", TestType::Running));
    assert!(!TestDataValidator::is_valid_intensity("250", TestType::Running));
    assert!(TestDataValidator::is_valid_intensity("250", TestType::Other));
}

#[test]
fn test_field_helpers() {
    assert!(TestDataValidator::is_valid_heart_rate("165"));
    assert!(!TestDataValidator::is_valid_heart_rate("16.5"));
    assert!(!TestDataValidator::is_valid_heart_rate(""));

    assert!(TestDataValidator::is_valid_lactate("0,8"));
    assert!(!TestDataValidator::is_valid_lactate("0.05"));
    assert!(!TestDataValidator::is_valid_lactate("abc"));
}
