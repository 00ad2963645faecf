//! Format dispatch and file handling for test export.

use std::path::Path;

use serde::Serialize;

use super::exporter_csv::{export_csv, export_summary_csv, export_trends_csv};
use super::exporter_json::{export_json, export_json_many, import_json};
use super::exporter_markdown::{
    export_markdown, export_summary_markdown, trends_markdown, ReportOptions,
};
use super::types::{ExportError, ExportFormat, LactateTest};
use crate::metrics::trends::TrendSummary;

/// Render one test in the given format.
pub fn export_test(
    test: &LactateTest,
    format: ExportFormat,
    options: &ReportOptions,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => export_json(test),
        ExportFormat::Csv => export_csv(test),
        ExportFormat::Markdown => export_markdown(test, options),
    }
}

/// Render a summary of many tests in the given format.
pub fn export_tests(tests: &[LactateTest], format: ExportFormat) -> Result<String, ExportError> {
    if tests.is_empty() {
        return Err(ExportError::NoData);
    }
    match format {
        ExportFormat::Json => export_json_many(tests),
        ExportFormat::Csv => export_summary_csv(tests),
        ExportFormat::Markdown => export_summary_markdown(tests),
    }
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    tests: &'a [LactateTest],
    trends: &'a TrendSummary,
}

/// Render a test history followed by its trend figures.
///
/// CSV output holds two tables separated by a blank line.
pub fn export_history(
    tests: &[LactateTest],
    trends: &TrendSummary,
    format: ExportFormat,
) -> Result<String, ExportError> {
    if tests.is_empty() {
        return Err(ExportError::NoData);
    }
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&HistoryExport { tests, trends })?),
        ExportFormat::Csv => Ok(format!("{}\n{}", export_summary_csv(tests)?, export_trends_csv(trends)?)),
        ExportFormat::Markdown => Ok(format!(
            "{}{}",
            export_summary_markdown(tests)?,
            trends_markdown(trends)?
        )),
    }
}

/// Render a test and write it to `path`.
pub fn export_test_to_file(
    test: &LactateTest,
    format: ExportFormat,
    options: &ReportOptions,
    path: &Path,
) -> Result<(), ExportError> {
    let content = export_test(test, format, options)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), ?format, "Exported test");
    Ok(())
}

/// Generate a default filename for a test export.
pub fn generate_filename(test: &LactateTest, format: ExportFormat) -> String {
    let timestamp = test.test_date.format("%Y%m%d_%H%M%S");
    format!("LactateTest_{}.{}", timestamp, format.extension())
}

/// Load a test from a JSON or TOML file, chosen by extension.
pub fn load_test(path: &Path) -> Result<LactateTest, ExportError> {
    let content = std::fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let test = if is_toml {
        toml::from_str(&content).map_err(|e| ExportError::ReadFailed(e.to_string()))?
    } else {
        import_json(&content)?
    };

    tracing::debug!(path = %path.display(), steps = test.steps.len(), "Loaded test");
    Ok(test)
}
