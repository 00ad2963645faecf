//! Lactate step test records: data entry model, validation and export.

pub mod export;
pub mod exporter_csv;
pub mod exporter_json;
pub mod exporter_markdown;
pub mod types;
pub mod validation;

pub use export::{
    export_history, export_test, export_test_to_file, export_tests, generate_filename, load_test,
};
pub use exporter_markdown::ReportOptions;
pub use types::{format_decimal, parse_decimal, ExportError, ExportFormat, LactateTest, TestStep, TestType};
pub use validation::{TestDataValidator, ValidationError, ValidationResult};
