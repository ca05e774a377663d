// =============================================================================
// Macro Indicators — Command-line entry point
// =============================================================================
//
// Loads one or two series from CSV exports, computes the configured
// indicators and prints the report as JSON on stdout.  Logs go to stderr so
// the output can be piped straight into another tool.
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use macro_indicators::loader::load_csv;
use macro_indicators::{build_report, EngineConfig, NamedSeries};

/// Compute technical and cross-asset indicators from CSV price series.
#[derive(Debug, Parser)]
#[command(name = "macro-indicators", version, about)]
struct Args {
    /// CSV file of the primary series (first column date, then values).
    #[arg(short, long)]
    primary: PathBuf,

    /// Optional CSV file of a second series for correlation, spread and ratio.
    #[arg(short, long)]
    secondary: Option<PathBuf>,

    /// Value column to read (header name); defaults to the second column.
    #[arg(long)]
    column: Option<String>,

    /// JSON engine configuration.
    #[arg(short, long, env = "MACRO_INDICATORS_CONFIG", default_value = "indicator_config.json")]
    config: PathBuf,

    /// Only use the last N observations of each series.
    #[arg(short, long, value_parser = parse_usize_positive)]
    tail: Option<usize>,

    /// Write the effective configuration to this path and continue.
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ── 2. Configuration ─────────────────────────────────────────────────
    let mut config = EngineConfig::load(&args.config).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        EngineConfig::default()
    });
    if let Some(n) = args.tail {
        config.lookback = Some(n);
    }
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }

    // ── 3. Input series ──────────────────────────────────────────────────
    let column = args.column.as_deref();
    let primary = load_csv(&args.primary, column)?;
    let secondary = args
        .secondary
        .as_ref()
        .map(|path| load_csv(path, column))
        .transpose()?;

    let primary_name = series_name(&args.primary);
    let secondary_name = args.secondary.as_deref().map(series_name).unwrap_or_default();

    // ── 4. Indicators ────────────────────────────────────────────────────
    let report = build_report(
        NamedSeries {
            name: &primary_name,
            series: &primary,
        },
        secondary.as_ref().map(|series| NamedSeries {
            name: &secondary_name,
            series,
        }),
        &config,
    );

    info!(
        primary = %primary_name,
        points = report.primary.points,
        pair = report.pair.is_some(),
        "report built"
    );

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");
    Ok(())
}

/// File stem of a series path, used as its label in the report.
fn series_name(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Validates that the tail length is a positive integer.
fn parse_usize_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Not a valid number: {e}")),
    }
}
