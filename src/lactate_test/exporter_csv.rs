//! CSV export of test data, test summaries and zone tables.

use std::io::Write;

use super::types::{format_decimal, ExportError, LactateTest};
use crate::metrics::trends::TrendSummary;
use crate::metrics::zones::TrainingZone;

/// Export the valid steps of a test.
pub fn export_csv(test: &LactateTest) -> Result<String, ExportError> {
    let steps = test.measured_steps();
    if steps.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut output = Vec::new();

    writeln!(output, "Step,Intensity,Heart Rate,Lactate")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for step in &steps {
        writeln!(
            output,
            "{},{},{},{}",
            step.step_number,
            format_decimal(step.intensity),
            step.heart_rate,
            format_decimal(step.lactate)
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Export one summary row per test.
pub fn export_summary_csv(tests: &[LactateTest]) -> Result<String, ExportError> {
    let mut output = Vec::new();

    writeln!(output, "Date,Type,LT1 Intensity,LT1 HR,LT2 Intensity,LT2 HR")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for test in tests {
        writeln!(
            output,
            "{},{},{},{},{},{}",
            test.test_date.format("%Y-%m-%d"),
            csv_field(test.sport_name()),
            test.lt1_intensity
                .map_or(String::new(), |v| (v as i64).to_string()),
            test.lt1_heart_rate.map_or(String::new(), |v| v.to_string()),
            test.lt2_intensity
                .map_or(String::new(), |v| (v as i64).to_string()),
            test.lt2_heart_rate.map_or(String::new(), |v| v.to_string()),
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Export trend figures as a single row.
pub fn export_trends_csv(summary: &TrendSummary) -> Result<String, ExportError> {
    let mut output = Vec::new();

    writeln!(output, "Type,Metric,Tests,Latest LT1,Latest LT2,LT1 Change %,LT2 Change %")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    writeln!(
        output,
        "{},{},{},{},{},{:.1},{:.1}",
        summary.test_type,
        csv_field(summary.metric.label()),
        summary.test_count(),
        summary.latest_lt1,
        summary.latest_lt2,
        summary.lt1_change_percent,
        summary.lt2_change_percent,
    )
    .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Export a zone list.
pub fn export_zones_csv(zones: &[TrainingZone]) -> Result<String, ExportError> {
    if zones.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut output = Vec::new();

    writeln!(output, "Zone,Lower,Upper,Color,Description")
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;

    for zone in zones {
        writeln!(
            output,
            "{},{:.1},{:.1},{},{}",
            csv_field(&zone.name),
            zone.lower_bound,
            zone.upper_bound,
            zone.color,
            csv_field(&zone.description),
        )
        .map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    }

    String::from_utf8(output).map_err(|e| ExportError::WriteFailed(e.to_string()))
}

/// Quote a field if it contains a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
