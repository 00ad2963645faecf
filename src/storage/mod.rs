//! Storage module for application configuration.

pub mod config;

pub use config::{load_config, save_config, AnalysisSettings, AppConfig, ConfigError, ExportSettings};
