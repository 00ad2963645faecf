//! LactateZones - Lactate Threshold Analysis
//!
//! Estimates the aerobic (LT1) and anaerobic (LT2) lactate thresholds from
//! incremental step test data and derives training zones from them using
//! 3-zone, Touretski 7-zone and Couzens 8-zone systems. Also provides the
//! step test record model, data validation, export and configuration.

pub mod lactate_test;
pub mod metrics;
pub mod storage;

// Re-export commonly used types
pub use lactate_test::{LactateTest, TestDataValidator, TestStep, TestType};
pub use metrics::thresholds::{ThresholdDetector, ThresholdPoint, ThresholdResult};
pub use metrics::zones::{calculate_zones, heart_rate_zones, TrainingZone, ZoneSystem};
pub use storage::config::AppConfig;
