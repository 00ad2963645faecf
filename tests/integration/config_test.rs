//! Integration tests for configuration persistence.

use lactate_zones::lactate_test::{ExportFormat, TestType};
use lactate_zones::metrics::zones::ZoneSystem;
use lactate_zones::storage::config::{load_config_from, save_config_to, AppConfig, ConfigError};

#[test]
fn test_config_drives_analysis_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[analysis]
zone_system = "couzens"
test_type = "Running"
max_hr = 192

[export]
format = "csv"
include_zones = false
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.analysis.zone_system, ZoneSystem::Couzens);
    assert_eq!(config.analysis.test_type, TestType::Running);
    assert_eq!(config.analysis.max_hr, Some(192));
    assert_eq!(config.export.format, ExportFormat::Csv);
    assert!(!config.export.include_zones);
    assert!(config.export.output_dir.is_none());
}

#[test]
fn test_config_round_trip_with_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.export.output_dir = Some(dir.path().join("reports"));
    config.analysis.zone_system = ZoneSystem::Touretski;

    save_config_to(&config, &path).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.export.output_dir, config.export.output_dir);
    assert_eq!(loaded.analysis.zone_system, ZoneSystem::Touretski);
    assert_eq!(loaded.version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_zone_system_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[analysis]\nzone_system = \"polarized\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
    assert!(err.to_string().starts_with("Parse error:"));
}
