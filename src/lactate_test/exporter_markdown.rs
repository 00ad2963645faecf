//! Markdown reports for a single test and for test history.

use std::fmt::Write;

use super::types::{format_decimal, ExportError, LactateTest};
use crate::metrics::trends::TrendSummary;
use crate::metrics::zones::{TrainingZone, ZoneSystem};

/// Optional sections of a single-test report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Append intensity and heart rate zone tables for this system.
    pub zone_system: Option<ZoneSystem>,
    /// Max heart rate for heart rate zones; estimated from LT2 when absent.
    pub max_hr: Option<u32>,
}

/// Full report for one test.
pub fn export_markdown(test: &LactateTest, options: &ReportOptions) -> Result<String, ExportError> {
    let mut md = String::new();
    let unit = test.intensity_unit();

    writeln!(md, "# Lactate Threshold Test\n").map_err(write_failed)?;
    writeln!(md, "**Date:** {}", test.test_date.format("%Y-%m-%d %H:%M")).map_err(write_failed)?;
    writeln!(md, "**Type:** {}\n", test.sport_name()).map_err(write_failed)?;

    writeln!(md, "## Results\n").map_err(write_failed)?;
    write_threshold(
        &mut md,
        "LT1 (Aerobic Threshold)",
        test.lt1_intensity,
        test.lt1_heart_rate,
        test.lt1_lactate,
        unit,
    )?;
    write_threshold(
        &mut md,
        "LT2 (Anaerobic Threshold)",
        test.lt2_intensity,
        test.lt2_heart_rate,
        test.lt2_lactate,
        unit,
    )?;

    if let Some(system) = options.zone_system {
        if let Some(zones) = test.intensity_zones(system) {
            writeln!(md, "## Training Zones - {}\n", system).map_err(write_failed)?;
            md.push_str(&zones_table(&zones, unit)?);
            md.push('\n');
        }
        if let Some(zones) = test.heart_rate_zones(system, options.max_hr) {
            writeln!(md, "## Heart Rate Zones - {}\n", system).map_err(write_failed)?;
            md.push_str(&zones_table(&zones, "bpm")?);
            md.push('\n');
        }
    }

    writeln!(md, "## Raw Data\n").map_err(write_failed)?;
    writeln!(md, "| Step | Intensity | HR | Lactate |").map_err(write_failed)?;
    writeln!(md, "|------|-----------|----|---------|").map_err(write_failed)?;
    for step in test.measured_steps() {
        writeln!(
            md,
            "| {} | {} | {} | {} |",
            step.step_number,
            format_decimal(step.intensity),
            step.heart_rate,
            format_decimal(step.lactate)
        )
        .map_err(write_failed)?;
    }

    if !test.notes.trim().is_empty() {
        writeln!(md, "\n## Notes\n\n{}", test.notes.trim()).map_err(write_failed)?;
    }

    Ok(md)
}

fn write_threshold(
    md: &mut String,
    title: &str,
    intensity: Option<f64>,
    heart_rate: Option<u32>,
    lactate: Option<f64>,
    unit: &str,
) -> Result<(), ExportError> {
    let Some(intensity) = intensity else {
        return Ok(());
    };

    writeln!(md, "### {}", title).map_err(write_failed)?;
    writeln!(md, "- Intensity: {} {}", intensity as i64, unit).map_err(write_failed)?;
    if let Some(hr) = heart_rate {
        writeln!(md, "- Heart Rate: {} bpm", hr).map_err(write_failed)?;
    }
    if let Some(lactate) = lactate {
        writeln!(md, "- Lactate: {} mmol/L", format_decimal(lactate)).map_err(write_failed)?;
    }
    writeln!(md).map_err(write_failed)?;
    Ok(())
}

/// Digest of several tests, most useful for tracking thresholds over time.
pub fn export_summary_markdown(tests: &[LactateTest]) -> Result<String, ExportError> {
    let mut md = String::from("# Lactate Threshold Test Results\n\n");

    for test in tests {
        let unit = test.intensity_unit();
        writeln!(md, "## Test: {}", test.test_date.format("%b %-d, %Y")).map_err(write_failed)?;
        writeln!(md, "**Type:** {}\n", test.sport_name()).map_err(write_failed)?;

        if let Some(lt1) = test.lt1_intensity {
            writeln!(md, "### LT1 (Aerobic Threshold)").map_err(write_failed)?;
            writeln!(md, "- Intensity: {} {}", lt1 as i64, unit).map_err(write_failed)?;
            if let Some(hr) = test.lt1_heart_rate {
                writeln!(md, "- Heart Rate: {} bpm", hr).map_err(write_failed)?;
            }
            writeln!(md).map_err(write_failed)?;
        }

        if let Some(lt2) = test.lt2_intensity {
            writeln!(md, "### LT2 (Anaerobic Threshold)").map_err(write_failed)?;
            writeln!(md, "- Intensity: {} {}", lt2 as i64, unit).map_err(write_failed)?;
            if let Some(hr) = test.lt2_heart_rate {
                writeln!(md, "- Heart Rate: {} bpm", hr).map_err(write_failed)?;
            }
            writeln!(md).map_err(write_failed)?;
        }

        writeln!(md, "---\n").map_err(write_failed)?;
    }

    Ok(md)
}

/// Trend figures as a Markdown section.
pub fn trends_markdown(summary: &TrendSummary) -> Result<String, ExportError> {
    let mut md = String::new();
    let unit = summary.unit();

    writeln!(md, "## Trends - {} ({})
", summary.test_type, summary.metric).map_err(write_failed)?;
    writeln!(md, "**Tests:** {}
", summary.test_count()).map_err(write_failed)?;
    writeln!(md, "| Threshold | Latest | Change |").map_err(write_failed)?;
    writeln!(md, "|-----------|--------|--------|").map_err(write_failed)?;
    writeln!(
        md,
        "| LT1 | {:.0} {} | {:+.1}% |",
        summary.latest_lt1, unit, summary.lt1_change_percent
    )
    .map_err(write_failed)?;
    writeln!(
        md,
        "| LT2 | {:.0} {} | {:+.1}% |",
        summary.latest_lt2, unit, summary.lt2_change_percent
    )
    .map_err(write_failed)?;

    Ok(md)
}

/// A zone list as a Markdown table.
pub fn zones_table(zones: &[TrainingZone], unit: &str) -> Result<String, ExportError> {
    let mut md = String::new();
    let unit_suffix = if unit.is_empty() {
        String::new()
    } else {
        format!(" ({})", unit)
    };

    writeln!(md, "| Zone | Range{} | Color | Description |", unit_suffix).map_err(write_failed)?;
    writeln!(md, "|------|-------|-------|-------------|").map_err(write_failed)?;
    for zone in zones {
        writeln!(
            md,
            "| {} | {:.0}-{:.0} | {} | {} |",
            zone.name, zone.lower_bound, zone.upper_bound, zone.color, zone.description
        )
        .map_err(write_failed)?;
    }

    Ok(md)
}

fn write_failed(e: std::fmt::Error) -> ExportError {
    ExportError::WriteFailed(e.to_string())
}
