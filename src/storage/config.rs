//! Application configuration.
//!
//! Stored as TOML in the platform data directory. A missing file means
//! defaults; a partial file fills the gaps with defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lactate_test::types::{ExportFormat, TestType};
use crate::metrics::zones::ZoneSystem;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Analysis defaults
    pub analysis: AnalysisSettings,
    /// Export defaults
    pub export: ExportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            analysis: AnalysisSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

/// Analysis-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Zone system used when none is requested
    pub zone_system: ZoneSystem,
    /// Sport assumed for new tests
    pub test_type: TestType,
    /// Measured max heart rate; estimated from LT2 when unset
    pub max_hr: Option<u32>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            zone_system: ZoneSystem::ThreeZone,
            test_type: TestType::Cycling,
            max_hr: None,
        }
    }
}

impl AnalysisSettings {
    /// Validate max heart rate value (30-250 bpm).
    pub fn validate_max_hr(max_hr: u32) -> bool {
        (30..=250).contains(&max_hr)
    }
}

/// Export-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Default export format
    pub format: ExportFormat,
    /// Include zone tables in Markdown reports
    pub include_zones: bool,
    /// Directory for exported files; current directory when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Markdown,
            include_zones: true,
            output_dir: None,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "lactatezones", "LactateZones")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load application configuration from a file.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if let Some(max_hr) = config.analysis.max_hr {
        if !AnalysisSettings::validate_max_hr(max_hr) {
            return Err(ConfigError::InvalidValue(format!(
                "max_hr must be between 30 and 250 bpm, got {}",
                max_hr
            )));
        }
    }

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save application configuration to a file.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
