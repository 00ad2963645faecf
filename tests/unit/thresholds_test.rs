//! Unit tests for LT1/LT2 detection.

use lactate_zones::metrics::thresholds::{
    Lt1Method, MeasuredStep, ThresholdDetector, MIN_STEPS_REQUIRED,
};

fn steps(rows: &[(f64, u32, f64)]) -> Vec<MeasuredStep> {
    rows.iter()
        .enumerate()
        .map(|(i, &(intensity, hr, lactate))| MeasuredStep::new(i as u32 + 1, intensity, hr, lactate))
        .collect()
}

#[test]
fn test_rise_detection_scenario() {
    let data = steps(&[(100.0, 120, 1.0), (150.0, 140, 1.2), (200.0, 160, 2.7), (250.0, 175, 5.0)]);
    let result = ThresholdDetector::new().calculate(&data);

    let lt1 = result.lt1.unwrap();
    assert_eq!((lt1.intensity, lt1.heart_rate, lt1.lactate), (150.0, 140, 1.2));

    // Only 200 W lies off the LT1-to-peak line
    let lt2 = result.lt2.unwrap();
    assert_eq!((lt2.intensity, lt2.heart_rate, lt2.lactate), (200.0, 160, 2.7));
}

#[test]
fn test_late_rise_takes_precedence_over_fixed_level() {
    // 1.8 -> 2.2 is a rise of 0.4, so the rise pass answers before the
    // 2.0 crossing is considered.
    let data = steps(&[
        (100.0, 120, 1.0),
        (150.0, 140, 1.2),
        (200.0, 155, 1.5),
        (250.0, 165, 1.8),
        (300.0, 175, 2.2),
    ]);
    let result = ThresholdDetector::new().calculate(&data);

    let lt1 = result.lt1.unwrap();
    assert_eq!(lt1.intensity, 250.0);
    assert_eq!(lt1.lactate, 1.8);
    assert_eq!(result.lt1_method, Some(Lt1Method::Rise));
}

#[test]
fn test_fixed_level_interpolates_to_two() {
    let data = steps(&[
        (100.0, 120, 1.0),
        (150.0, 140, 1.25),
        (200.0, 155, 1.5),
        (250.0, 165, 1.75),
        (300.0, 175, 2.0),
    ]);
    let result = ThresholdDetector::new().calculate(&data);

    let lt1 = result.lt1.unwrap();
    assert_eq!(result.lt1_method, Some(Lt1Method::FixedLevel));
    assert_eq!(lt1.lactate, 2.0);
    assert_eq!(lt1.intensity, 300.0);
    assert_eq!(lt1.heart_rate, 175);
    // LT1 is the last step, nothing is left for D-max
    assert!(result.lt2.is_none());
}

#[test]
fn test_no_threshold_when_lactate_stays_flat() {
    let data = steps(&[(100.0, 120, 1.0), (150.0, 135, 1.1), (200.0, 150, 1.2), (250.0, 165, 1.3)]);
    let result = ThresholdDetector::new().calculate(&data);

    assert!(result.lt1.is_none());
    assert!(result.lt2.is_none());
    assert!(result.lt1_method.is_none());
}

#[test]
fn test_too_few_steps() {
    let data = steps(&[(100.0, 120, 1.0), (200.0, 160, 4.0)]);
    assert!(data.len() < MIN_STEPS_REQUIRED);

    let result = ThresholdDetector::new().calculate(&data);
    assert!(result.lt1.is_none());
    assert!(result.lt2.is_none());
}

#[test]
fn test_input_order_does_not_matter() {
    let ordered = steps(&[
        (100.0, 120, 1.0),
        (150.0, 135, 1.2),
        (200.0, 150, 1.9),
        (250.0, 165, 3.4),
        (300.0, 180, 6.8),
    ]);
    let mut reversed = ordered.clone();
    reversed.reverse();

    let detector = ThresholdDetector::new();
    assert_eq!(detector.calculate(&ordered), detector.calculate(&reversed));
}

#[test]
fn test_threshold_properties_hold_across_profiles() {
    let detector = ThresholdDetector::new();
    let intensities = [100.0, 140.0, 180.0, 220.0, 260.0, 300.0];
    let heart_rates = [118, 130, 142, 155, 168, 181];

    // Exponential-ish curves with different onsets plus a few odd shapes
    let mut profiles: Vec<Vec<f64>> = (1..=6)
        .map(|k| {
            intensities
                .iter()
                .map(|x| 0.8 + (x / 300.0_f64).powi(k) * 7.0)
                .collect()
        })
        .collect();
    profiles.push(vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    profiles.push(vec![3.0, 2.5, 2.2, 2.0, 2.4, 5.0]);
    profiles.push(vec![1.0, 1.1, 1.2, 1.3, 1.9, 2.0]);

    for lactates in profiles {
        let data: Vec<MeasuredStep> = intensities
            .iter()
            .zip(heart_rates)
            .zip(&lactates)
            .enumerate()
            .map(|(i, ((&x, hr), &l))| MeasuredStep::new(i as u32 + 1, x, hr, l))
            .collect();

        let result = detector.calculate(&data);

        if result.lt1.is_none() {
            assert!(result.lt2.is_none(), "LT2 without LT1 for {:?}", lactates);
        }

        if let (Some(lt1), Some(lt2)) = (result.lt1, result.lt2) {
            assert!(lt2.intensity > lt1.intensity, "LT2 not above LT1 for {:?}", lactates);
            assert!(data.iter().any(|s| s.intensity == lt2.intensity && s.lactate == lt2.lactate));
        }

        if result.lt1_method == Some(Lt1Method::Rise) {
            let lt1 = result.lt1.unwrap();
            assert!(data.iter().any(|s| {
                s.intensity == lt1.intensity && s.heart_rate == lt1.heart_rate && s.lactate == lt1.lactate
            }));
        }
    }
}

#[test]
fn test_lt2_tie_keeps_first_candidate() {
    // 150 W sits below the line and 300 W above it by the same distance
    let data = steps(&[
        (100.0, 120, 1.0),
        (150.0, 130, 1.5),
        (200.0, 140, 3.0),
        (250.0, 150, 3.5),
        (300.0, 160, 5.0),
        (350.0, 170, 5.5),
    ]);
    let result = ThresholdDetector::new().calculate(&data);

    assert_eq!(result.lt1.unwrap().intensity, 100.0);
    assert_eq!(result.lt2.unwrap().intensity, 150.0);
}
