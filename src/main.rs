//! LactateZones - command line entry point.
//!
//! With one file: validates a step test, detects LT1 and LT2, and prints or
//! exports the thresholds with training zones. With several files: prints
//! the test history summary and threshold trends for one sport.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lactate_zones::lactate_test::{
    self, ExportFormat, LactateTest, ReportOptions, TestDataValidator, TestType,
};
use lactate_zones::metrics::thresholds::{Lt1Method, ThresholdPoint, ThresholdResult};
use lactate_zones::metrics::trends::{self, TrendMetric, TrendSummary};
use lactate_zones::metrics::zones::{self, TrainingZone, ZoneSystem};
use lactate_zones::metrics::AnalyticsResult;
use lactate_zones::storage::config::{self, AppConfig};

/// Lactate threshold and training zone calculator
#[derive(Parser, Debug)]
#[command(name = "lactate-zones", version, about, long_about = None)]
struct Args {
    /// Test files (.json or .toml); more than one shows history and trends
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Zone system: three, touretski or couzens
    #[arg(short, long)]
    system: Option<ZoneSystem>,

    /// Maximum heart rate in bpm; estimated from LT2 when omitted
    #[arg(long)]
    max_hr: Option<u32>,

    /// Sport to show trends for: cycling, running or other
    #[arg(long)]
    sport: Option<TestType>,

    /// Trend metric: intensity or heart-rate
    #[arg(long, default_value = "intensity")]
    metric: TrendMetric,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calculate even if the data fails validation
    #[arg(long)]
    skip_validation: bool,

    /// Also save a report per test in the configured export format and directory
    #[arg(long)]
    export: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    fn export_format(self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Json => Some(ExportFormat::Json),
            OutputFormat::Csv => Some(ExportFormat::Csv),
            OutputFormat::Markdown => Some(ExportFormat::Markdown),
        }
    }
}

/// Machine-readable analysis result.
#[derive(Debug, Serialize)]
struct AnalysisReport<'a> {
    test: &'a LactateTest,
    thresholds: ThresholdResult,
    zone_system: ZoneSystem,
    intensity_zones: Option<Vec<TrainingZone>>,
    heart_rate_zones: Option<Vec<TrainingZone>>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    tracing::debug!("Starting LactateZones v{}", env!("CARGO_PKG_VERSION"));

    let app_config = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("Failed to load configuration")?;

    let system = args.system.unwrap_or(app_config.analysis.zone_system);
    let max_hr = args.max_hr.or(app_config.analysis.max_hr);

    let mut tests = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let test = load_and_validate(path, args.skip_validation)?;
        tests.push(test);
    }

    let output = if tests.len() == 1 {
        analyze_single(&args, &app_config, &mut tests[0], system, max_hr)?
    } else {
        analyze_history(&args, &app_config, &mut tests)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Output written");
        }
        None => print!("{}", output),
    }

    if args.export {
        for test in &tests {
            export_report(&app_config, test, system, max_hr)?;
        }
    }

    Ok(())
}

fn load_and_validate(path: &Path, skip_validation: bool) -> Result<LactateTest> {
    let test = lactate_test::load_test(path)
        .with_context(|| format!("Failed to load test from {}", path.display()))?;

    if !skip_validation {
        let validation = TestDataValidator::validate_test(&test);
        if !validation.is_valid() {
            for error in &validation.errors {
                eprintln!("error: {}: {}", path.display(), error);
            }
            bail!(
                "{} failed validation with {} error(s); use --skip-validation to calculate anyway",
                path.display(),
                validation.errors.len()
            );
        }
    }

    Ok(test)
}

fn analyze_single(
    args: &Args,
    app_config: &AppConfig,
    test: &mut LactateTest,
    system: ZoneSystem,
    max_hr: Option<u32>,
) -> Result<String> {
    let thresholds = match test.try_calculate_thresholds() {
        Ok(thresholds) => thresholds,
        Err(e) => bail!("{}\n{}", e, e.recovery_suggestion()),
    };

    tracing::info!(
        steps = test.measured_steps().len(),
        lt1 = ?test.lt1_intensity,
        lt2 = ?test.lt2_intensity,
        "Thresholds calculated"
    );

    let options = ReportOptions {
        zone_system: app_config.export.include_zones.then_some(system),
        max_hr,
    };

    let output = match args.format.export_format() {
        None => render_text(test, &thresholds, system, max_hr),
        Some(ExportFormat::Json) => {
            let report = AnalysisReport {
                test: &*test,
                thresholds,
                zone_system: system,
                intensity_zones: test.intensity_zones(system),
                heart_rate_zones: test.heart_rate_zones(system, max_hr),
            };
            serde_json::to_string_pretty(&report)? + "\n"
        }
        Some(format) => lactate_test::export_test(test, format, &options)?,
    };

    Ok(output)
}

fn analyze_history(args: &Args, app_config: &AppConfig, tests: &mut [LactateTest]) -> Result<String> {
    for test in tests.iter_mut() {
        if let Err(e) = test.try_calculate_thresholds() {
            tracing::warn!(test_id = %test.id, date = %test.test_date, "{}", e);
        }
    }
    tests.sort_by_key(|t| t.test_date);

    let configured = app_config.analysis.test_type;
    let sport = args.sport.unwrap_or_else(|| {
        if tests.iter().any(|t| t.test_type == configured) {
            configured
        } else {
            trends::first_test_type(tests).unwrap_or(configured)
        }
    });
    let summary = trends::summarize(tests, sport, args.metric);

    tracing::info!(
        tests = tests.len(),
        sport = %sport,
        compared = summary.test_count(),
        "History summarized"
    );

    let output = match args.format.export_format() {
        None => render_history_text(tests, &summary),
        Some(format) => lactate_test::export_history(tests, &summary, format)?,
    };

    Ok(output)
}

fn export_report(
    app_config: &AppConfig,
    test: &LactateTest,
    system: ZoneSystem,
    max_hr: Option<u32>,
) -> Result<()> {
    let format = app_config.export.format;
    let options = ReportOptions {
        zone_system: app_config.export.include_zones.then_some(system),
        max_hr,
    };
    let dir = app_config
        .export
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(lactate_test::generate_filename(test, format));
    lactate_test::export_test_to_file(test, format, &options, &path)
        .with_context(|| format!("Failed to export {}", path.display()))?;
    Ok(())
}

fn render_text(
    test: &LactateTest,
    thresholds: &ThresholdResult,
    system: ZoneSystem,
    max_hr: Option<u32>,
) -> String {
    let unit = test.intensity_unit();
    let mut out = format!(
        "{} test, {} ({} valid steps)\n\n",
        test.sport_name(),
        test.test_date.format("%Y-%m-%d"),
        test.measured_steps().len()
    );

    let method = match thresholds.lt1_method {
        Some(Lt1Method::Rise) => " [first lactate rise]",
        Some(Lt1Method::FixedLevel) => " [2.0 mmol/L crossing]",
        None => "",
    };
    out.push_str(&format_threshold("LT1", thresholds.require_lt1(), unit, method));
    out.push_str(&format_threshold("LT2", thresholds.require_lt2(), unit, ""));

    if let Ok((lt1, lt2)) = thresholds.require_both() {
        let intensity_zones = zones::calculate_zones(lt1.intensity, lt2.intensity, system);
        out.push_str(&format!("\n{} - intensity\n", system));
        out.push_str(&format_zones(&intensity_zones, unit));

        let max = max_hr.unwrap_or_else(|| zones::estimate_max_heart_rate(lt2.heart_rate));
        let hr_zones = zones::heart_rate_zones(lt1.heart_rate, lt2.heart_rate, max, system);
        out.push_str(&format!("\n{} - heart rate\n", system));
        out.push_str(&format_zones(&hr_zones, "bpm"));
    }

    out
}

fn format_threshold(
    label: &str,
    point: AnalyticsResult<ThresholdPoint>,
    unit: &str,
    note: &str,
) -> String {
    match point {
        Ok(p) => format!(
            "{}: {:.0} {} @ {} bpm, {:.1} mmol/L{}\n",
            label, p.intensity, unit, p.heart_rate, p.lactate, note
        ),
        Err(e) => format!("{}\n  {}\n", e, e.recovery_suggestion()),
    }
}

fn format_zones(zones: &[TrainingZone], unit: &str) -> String {
    zones
        .iter()
        .map(|z| {
            format!(
                "  {:<28} {:>6.0} - {:<6.0} {:<5} {:<10} {}\n",
                z.name, z.lower_bound, z.upper_bound, unit, z.color.as_str(), z.description
            )
        })
        .collect()
}

fn render_history_text(tests: &[LactateTest], summary: &TrendSummary) -> String {
    let mut out = String::from("Date        Sport       LT1      LT2\n");
    for test in tests {
        let unit = test.intensity_unit();
        let value = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{:.0} {}", v, unit));
        out.push_str(&format!(
            "{}  {:<10}  {:<7}  {}\n",
            test.test_date.format("%Y-%m-%d"),
            test.sport_name(),
            value(test.lt1_intensity),
            value(test.lt2_intensity)
        ));
    }

    let unit = summary.unit();
    out.push_str(&format!(
        "\nTrends - {} ({}), {} tests\n",
        summary.test_type,
        summary.metric,
        summary.test_count()
    ));
    out.push_str(&format!(
        "  LT1: {:.0} {} ({:+.1}%)\n",
        summary.latest_lt1, unit, summary.lt1_change_percent
    ));
    out.push_str(&format!(
        "  LT2: {:.0} {} ({:+.1}%)\n",
        summary.latest_lt2, unit, summary.lt2_change_percent
    ));
    out
}
