//! Training zone calculations from lactate thresholds.
//!
//! Three zone systems are supported, each for intensity and for heart rate:
//! - a simple 3-zone model split at LT1 and LT2
//! - Gennadi Touretski's 7-zone swimming model
//! - Alan Couzens' 8-zone model with individualized offsets
//!
//! Bounds follow the published formulas literally. Speed zones overlap the
//! aerobic zones on purpose and zone lists are never re-sorted.

use serde::{Deserialize, Serialize};

/// Multiplier estimating maximal intensity from LT2 when no max is measured.
pub const MAX_INTENSITY_FROM_LT2: f64 = 1.15;

/// Multiplier estimating max heart rate from LT2 heart rate.
pub const MAX_HR_FROM_LT2: f64 = 1.1;

/// Touretski intensity multipliers.
pub mod touretski {
    /// A1 upper bound as a fraction of LT1.
    pub const RECOVERY_UPPER_MULTIPLIER: f64 = 0.85;
    /// AT upper bound sits this far between LT1 and LT2.
    pub const THRESHOLD_MIDPOINT_FACTOR: f64 = 0.5;
    /// LT upper bound as a fraction of LT2.
    pub const LACTATE_TOLERANCE_MULTIPLIER: f64 = 1.05;
    /// SP lower bound as a fraction of LT1.
    pub const SPEED_LOWER_MULTIPLIER: f64 = 0.7;
}

/// Couzens intensity factors.
pub mod couzens {
    /// The LT1-LT2 span is divided by this to get one zone offset.
    pub const ZONE_OFFSET_DIVISOR: f64 = 4.0;
    /// Zone 6 starts this many offsets below the max estimate.
    pub const ZONE6_LOWER_OFFSET_MULTIPLIER: f64 = 0.5;
}

/// Heart rate offsets in bpm.
pub mod heart_rate {
    /// Used for most boundaries.
    pub const STANDARD_OFFSET: u32 = 10;
    /// Recovery zones.
    pub const LARGE_OFFSET: u32 = 20;
    /// Near max HR.
    pub const SMALL_OFFSET: u32 = 5;
    /// Touretski SP upper bound below LT2.
    pub const SPEED_UPPER_OFFSET: u32 = 15;
}

/// Zone display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneColor {
    LightGray,
    LightGreen,
    Green,
    Yellow,
    Orange,
    Red,
    DarkRed,
    Purple,
    LightBlue,
}

impl ZoneColor {
    /// Every palette entry.
    pub const ALL: [ZoneColor; 9] = [
        ZoneColor::LightGray,
        ZoneColor::LightGreen,
        ZoneColor::Green,
        ZoneColor::Yellow,
        ZoneColor::Orange,
        ZoneColor::Red,
        ZoneColor::DarkRed,
        ZoneColor::Purple,
        ZoneColor::LightBlue,
    ];

    /// Color tag as used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneColor::LightGray => "lightgray",
            ZoneColor::LightGreen => "lightgreen",
            ZoneColor::Green => "green",
            ZoneColor::Yellow => "yellow",
            ZoneColor::Orange => "orange",
            ZoneColor::Red => "red",
            ZoneColor::DarkRed => "darkred",
            ZoneColor::Purple => "purple",
            ZoneColor::LightBlue => "lightblue",
        }
    }
}

impl std::fmt::Display for ZoneColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Zone system selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneSystem {
    /// 3 zones split at LT1 and LT2.
    #[default]
    ThreeZone,
    /// Touretski 7 zones.
    Touretski,
    /// Couzens 8 zones.
    Couzens,
}

impl ZoneSystem {
    /// All systems, simplest first.
    pub fn all() -> [ZoneSystem; 3] {
        [ZoneSystem::ThreeZone, ZoneSystem::Touretski, ZoneSystem::Couzens]
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ZoneSystem::ThreeZone => "3-Zone (Simple)",
            ZoneSystem::Touretski => "7-Zone (Touretski)",
            ZoneSystem::Couzens => "8-Zone (Couzens)",
        }
    }

    /// Number of zones the system produces.
    pub fn zone_count(&self) -> usize {
        match self {
            ZoneSystem::ThreeZone => 3,
            ZoneSystem::Touretski => 7,
            ZoneSystem::Couzens => 8,
        }
    }
}

impl std::fmt::Display for ZoneSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ZoneSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "three" | "threezone" | "three-zone" | "3" | "simple" => Ok(ZoneSystem::ThreeZone),
            "touretski" | "7" => Ok(ZoneSystem::Touretski),
            "couzens" | "8" => Ok(ZoneSystem::Couzens),
            other => Err(format!("Unknown zone system: {}", other)),
        }
    }
}

/// A training zone on the intensity or heart-rate axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingZone {
    /// Zone name
    pub name: String,
    /// Lower bound (intensity units or bpm)
    pub lower_bound: f64,
    /// Upper bound (intensity units or bpm)
    pub upper_bound: f64,
    /// Display color
    pub color: ZoneColor,
    /// What the zone is for
    pub description: String,
}

impl TrainingZone {
    fn new(name: &str, lower_bound: f64, upper_bound: f64, color: ZoneColor, description: &str) -> Self {
        Self {
            name: name.to_string(),
            lower_bound,
            upper_bound,
            color,
            description: description.to_string(),
        }
    }

    /// Whether `value` lies within the closed zone range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }
}

/// First zone in list order whose range contains `value`.
pub fn find_zone(zones: &[TrainingZone], value: f64) -> Option<&TrainingZone> {
    zones.iter().find(|zone| zone.contains(value))
}

/// Max heart rate estimate when none was measured, truncated to whole bpm.
pub fn estimate_max_heart_rate(lt2_hr: u32) -> u32 {
    (lt2_hr as f64 * MAX_HR_FROM_LT2) as u32
}

/// Intensity zones from LT1 and LT2 intensities.
pub fn calculate_zones(lt1: f64, lt2: f64, system: ZoneSystem) -> Vec<TrainingZone> {
    match system {
        ZoneSystem::ThreeZone => three_zone_intensity(lt1, lt2),
        ZoneSystem::Touretski => touretski_intensity(lt1, lt2),
        ZoneSystem::Couzens => couzens_intensity(lt1, lt2),
    }
}

/// Heart rate zones from LT1 and LT2 heart rates and max heart rate.
pub fn heart_rate_zones(lt1_hr: u32, lt2_hr: u32, max_hr: u32, system: ZoneSystem) -> Vec<TrainingZone> {
    let lt1 = lt1_hr as f64;
    let lt2 = lt2_hr as f64;
    let max = max_hr as f64;

    match system {
        ZoneSystem::ThreeZone => three_zone_heart_rate(lt1, lt2, max),
        ZoneSystem::Touretski => touretski_heart_rate(lt1, lt2, max),
        ZoneSystem::Couzens => couzens_heart_rate(lt1, lt2, max),
    }
}

fn three_zone_intensity(lt1: f64, lt2: f64) -> Vec<TrainingZone> {
    let max_estimate = lt2 * MAX_INTENSITY_FROM_LT2;

    vec![
        TrainingZone::new(
            "Zone 1 - Easy",
            0.0,
            lt1,
            ZoneColor::Green,
            "Below first threshold - Easy aerobic work",
        ),
        TrainingZone::new(
            "Zone 2 - Moderate",
            lt1,
            lt2,
            ZoneColor::Yellow,
            "Between thresholds - Steady/threshold work",
        ),
        TrainingZone::new(
            "Zone 3 - Hard",
            lt2,
            max_estimate,
            ZoneColor::Red,
            "Above second threshold - VO2max/anaerobic work",
        ),
    ]
}

fn touretski_intensity(lt1: f64, lt2: f64) -> Vec<TrainingZone> {
    let max_estimate = lt2 * MAX_INTENSITY_FROM_LT2;
    let recovery_upper = lt1 * touretski::RECOVERY_UPPER_MULTIPLIER;
    let threshold_mid = lt1 + (lt2 - lt1) * touretski::THRESHOLD_MIDPOINT_FACTOR;
    let tolerance_upper = lt2 * touretski::LACTATE_TOLERANCE_MULTIPLIER;
    let speed_lower = lt1 * touretski::SPEED_LOWER_MULTIPLIER;

    vec![
        TrainingZone::new(
            "A1 - Recovery",
            0.0,
            recovery_upper,
            ZoneColor::LightBlue,
            "Recovery pace (1-2mmol/L)",
        ),
        TrainingZone::new(
            "A2 - Aerobic Base",
            recovery_upper,
            lt1,
            ZoneColor::Green,
            "Aerobic base building (2-3mmol/L)",
        ),
        TrainingZone::new(
            "AT - Aerobic Threshold",
            lt1,
            threshold_mid,
            ZoneColor::Yellow,
            "Aerobic threshold pace (3-5mmol/L)",
        ),
        TrainingZone::new(
            "MVO2 - Max Aerobic",
            threshold_mid,
            lt2,
            ZoneColor::Orange,
            "Maximum aerobic power (5-10mmol/L)",
        ),
        TrainingZone::new(
            "LT - Lactate Tolerance",
            lt2,
            tolerance_upper,
            ZoneColor::Red,
            "Lactate tolerance (8-15mmol/L)",
        ),
        TrainingZone::new(
            "LP - Lactate Production",
            tolerance_upper,
            max_estimate,
            ZoneColor::DarkRed,
            "Lactate production (8-12mmol/L)",
        ),
        TrainingZone::new(
            "SP - Speed",
            speed_lower,
            max_estimate,
            ZoneColor::Purple,
            "Speed/alactic work (3-6mmol/L)",
        ),
    ]
}

fn couzens_intensity(lt1: f64, lt2: f64) -> Vec<TrainingZone> {
    let zone_offset = (lt2 - lt1) / couzens::ZONE_OFFSET_DIVISOR;
    let max_estimate = lt2 + zone_offset;
    let recovery_upper = (lt1 - zone_offset).max(0.0);

    vec![
        TrainingZone::new(
            "Zone 0 - Active Recovery",
            0.0,
            recovery_upper,
            ZoneColor::LightGray,
            "Active recovery - movement for recovery",
        ),
        TrainingZone::new(
            "Zone 1 - Easy Aerobic",
            recovery_upper,
            lt1,
            ZoneColor::LightGreen,
            "Easy aerobic - base building",
        ),
        TrainingZone::new(
            "Zone 2 - Steady Endurance",
            lt1,
            lt1 + zone_offset,
            ZoneColor::Green,
            "Steady endurance - first tier fast oxidative fibers",
        ),
        TrainingZone::new(
            "Zone 3 - Moderate Aerobic",
            lt1 + zone_offset,
            lt2 - zone_offset,
            ZoneColor::Yellow,
            "Moderate aerobic - avoid unless race pace",
        ),
        TrainingZone::new(
            "Zone 4 - Threshold",
            lt2 - zone_offset,
            lt2,
            ZoneColor::Orange,
            "Threshold training - aerobic power",
        ),
        TrainingZone::new(
            "Zone 5 - Max VO2",
            lt2,
            max_estimate,
            ZoneColor::Red,
            "VO2max training - maximal aerobic power",
        ),
        TrainingZone::new(
            "Zone 6 - Lactate Tolerance",
            max_estimate - zone_offset * couzens::ZONE6_LOWER_OFFSET_MULTIPLIER,
            max_estimate,
            ZoneColor::DarkRed,
            "Lactate tolerance/production",
        ),
        TrainingZone::new(
            "Zone 7 - Speed",
            lt1 + zone_offset,
            lt2,
            ZoneColor::Purple,
            "Speed/alactic work",
        ),
    ]
}

fn three_zone_heart_rate(lt1: f64, lt2: f64, max: f64) -> Vec<TrainingZone> {
    vec![
        TrainingZone::new("Zone 1 - Easy", 0.0, lt1, ZoneColor::Green, "Below first threshold"),
        TrainingZone::new("Zone 2 - Moderate", lt1, lt2, ZoneColor::Yellow, "Between thresholds"),
        TrainingZone::new("Zone 3 - Hard", lt2, max, ZoneColor::Red, "Above second threshold"),
    ]
}

fn touretski_heart_rate(lt1: f64, lt2: f64, max: f64) -> Vec<TrainingZone> {
    let std_offset = heart_rate::STANDARD_OFFSET as f64;
    let lg_offset = heart_rate::LARGE_OFFSET as f64;
    let sm_offset = heart_rate::SMALL_OFFSET as f64;
    let sp_offset = heart_rate::SPEED_UPPER_OFFSET as f64;

    vec![
        TrainingZone::new("A1", lt1 - lg_offset, lt1 - std_offset, ZoneColor::LightBlue, "60-70% effort"),
        TrainingZone::new("A2", lt1 - std_offset, lt1, ZoneColor::Green, "70-75% effort"),
        TrainingZone::new("AT", lt1, lt2 - std_offset, ZoneColor::Yellow, "80-85% effort"),
        TrainingZone::new("MVO2", lt2 - std_offset, lt2, ZoneColor::Orange, "90-95% effort"),
        TrainingZone::new("LT", lt2, max - sm_offset, ZoneColor::Red, "95-100% effort"),
        TrainingZone::new("LP", max - sm_offset, max, ZoneColor::DarkRed, "95-100% effort"),
        TrainingZone::new("SP", lt1, lt2 - sp_offset, ZoneColor::Purple, "80-85% effort"),
    ]
}

fn couzens_heart_rate(lt1: f64, lt2: f64, max: f64) -> Vec<TrainingZone> {
    let std_offset = heart_rate::STANDARD_OFFSET as f64;
    let sm_offset = heart_rate::SMALL_OFFSET as f64;

    vec![
        TrainingZone::new("Zone 0", 0.0, lt1 - std_offset, ZoneColor::LightGray, "Recovery"),
        TrainingZone::new("Zone 1", lt1 - std_offset, lt1, ZoneColor::LightGreen, "Easy aerobic"),
        TrainingZone::new("Zone 2", lt1, lt1 + std_offset, ZoneColor::Green, "Steady endurance"),
        TrainingZone::new("Zone 3", lt1 + std_offset, lt2 - std_offset, ZoneColor::Yellow, "Moderate aerobic"),
        TrainingZone::new("Zone 4", lt2 - std_offset, lt2, ZoneColor::Orange, "Threshold"),
        TrainingZone::new("Zone 5", lt2, max - sm_offset, ZoneColor::Red, "Max VO2"),
        TrainingZone::new("Zone 6", max - sm_offset, max, ZoneColor::DarkRed, "Lactate tolerance"),
        TrainingZone::new("Zone 7", lt1, lt2, ZoneColor::Purple, "Speed work"),
    ]
}
