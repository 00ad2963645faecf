//! JSON export and import of full test records.

use super::types::{ExportError, LactateTest};

/// Pretty-printed JSON for one test.
pub fn export_json(test: &LactateTest) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(test)?)
}

/// Pretty-printed JSON array for many tests.
pub fn export_json_many(tests: &[LactateTest]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(tests)?)
}

/// Parse a test previously exported with [`export_json`].
pub fn import_json(content: &str) -> Result<LactateTest, ExportError> {
    Ok(serde_json::from_str(content)?)
}
