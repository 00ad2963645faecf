//! Threshold trends across a test history.
//!
//! Tests are compared within one sport, oldest first. Missing thresholds
//! count as 0, and a change is only reported when the first test has a
//! positive value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lactate_test::types::{LactateTest, TestType};

/// Which threshold value a trend follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Power or speed at the threshold.
    #[default]
    Intensity,
    /// Heart rate at the threshold.
    HeartRate,
}

impl TrendMetric {
    pub fn label(&self) -> &'static str {
        match self {
            TrendMetric::Intensity => "Power/Speed",
            TrendMetric::HeartRate => "Heart Rate",
        }
    }

    /// Unit label for a sport.
    pub fn unit(&self, test_type: TestType) -> &'static str {
        match self {
            TrendMetric::Intensity => test_type.intensity_unit(),
            TrendMetric::HeartRate => "bpm",
        }
    }

    fn lt1(&self, test: &LactateTest) -> f64 {
        match self {
            TrendMetric::Intensity => test.lt1_intensity.unwrap_or(0.0),
            TrendMetric::HeartRate => test.lt1_heart_rate.unwrap_or(0) as f64,
        }
    }

    fn lt2(&self, test: &LactateTest) -> f64 {
        match self {
            TrendMetric::Intensity => test.lt2_intensity.unwrap_or(0.0),
            TrendMetric::HeartRate => test.lt2_heart_rate.unwrap_or(0) as f64,
        }
    }
}

impl std::fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TrendMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intensity" | "power" | "speed" => Ok(TrendMetric::Intensity),
            "heart-rate" | "heart_rate" | "heartrate" | "hr" => Ok(TrendMetric::HeartRate),
            other => Err(format!("Unknown trend metric: {}", other)),
        }
    }
}

/// One test on the trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub test_date: DateTime<Utc>,
    pub lt1: f64,
    pub lt2: f64,
}

/// Trend figures for one sport and metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub test_type: TestType,
    pub metric: TrendMetric,
    /// Oldest first
    pub points: Vec<TrendPoint>,
    /// Values of the most recent test, 0 when there are none.
    pub latest_lt1: f64,
    pub latest_lt2: f64,
    /// Percent change from the first test to the last.
    pub lt1_change_percent: f64,
    pub lt2_change_percent: f64,
}

impl TrendSummary {
    pub fn test_count(&self) -> usize {
        self.points.len()
    }

    pub fn unit(&self) -> &'static str {
        self.metric.unit(self.test_type)
    }
}

/// Tests of one sport, oldest first.
pub fn tests_of_type(tests: &[LactateTest], test_type: TestType) -> Vec<&LactateTest> {
    let mut filtered: Vec<&LactateTest> = tests.iter().filter(|t| t.test_type == test_type).collect();
    filtered.sort_by_key(|t| t.test_date);
    filtered
}

/// First sport, in [`TestType::all`] order, with at least one test.
pub fn first_test_type(tests: &[LactateTest]) -> Option<TestType> {
    TestType::all()
        .into_iter()
        .find(|test_type| tests.iter().any(|t| t.test_type == *test_type))
}

/// Percent change from `first` to `last`; 0 unless `first` is positive.
pub fn percent_change(first: f64, last: f64) -> f64 {
    if first > 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    }
}

/// Trend figures for the tests of one sport.
pub fn summarize(tests: &[LactateTest], test_type: TestType, metric: TrendMetric) -> TrendSummary {
    let history = tests_of_type(tests, test_type);

    let points: Vec<TrendPoint> = history
        .iter()
        .map(|test| TrendPoint {
            test_date: test.test_date,
            lt1: metric.lt1(test),
            lt2: metric.lt2(test),
        })
        .collect();

    let (latest_lt1, latest_lt2) = points.last().map_or((0.0, 0.0), |p| (p.lt1, p.lt2));

    let (lt1_change_percent, lt2_change_percent) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => (
            percent_change(first.lt1, last.lt1),
            percent_change(first.lt2, last.lt2),
        ),
        _ => (0.0, 0.0),
    };

    tracing::debug!(
        ?test_type,
        ?metric,
        tests = points.len(),
        lt1_change_percent,
        lt2_change_percent,
        "Trend summarized"
    );

    TrendSummary {
        test_type,
        metric,
        points,
        latest_lt1,
        latest_lt2,
        lt1_change_percent,
        lt2_change_percent,
    }
}
