//! CLI entry point for the dataset profiler.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use datascope_profiling::{
    ProfileOutcome, ProfilePipeline, ProfilerConfig, ReportKind,
};
use std::path::Path;
use tracing::error;

/// CLI-compatible report selection enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportKind {
    /// Chart-only document
    Visual,
    /// Statistics-and-tables document plus the scaled dataset
    Summary,
    /// Both documents
    Both,
}

impl From<CliReportKind> for ReportKind {
    fn from(cli: CliReportKind) -> Self {
        match cli {
            CliReportKind::Visual => ReportKind::Visual,
            CliReportKind::Summary => ReportKind::Summary,
            CliReportKind::Both => ReportKind::Both,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Automated exploratory data analysis for tabular datasets",
    long_about = "Profiles a CSV or Parquet dataset: infers column types, computes\n\
                  data-quality statistics, renders charts, and assembles report\n\
                  documents.\n\n\
                  EXAMPLES:\n  \
                  # Full profile with both reports\n  \
                  datascope-profiling -i train.csv\n\n  \
                  # Summary report only, custom output directory\n  \
                  datascope-profiling -i train.csv -o reports --report summary\n\n  \
                  # Machine-readable outcome\n  \
                  datascope-profiling -i train.csv --json | jq .classification"
)]
struct Args {
    /// Path to the CSV or Parquet file to profile
    #[arg(short, long)]
    input: String,

    /// Output directory for reports, charts, and the scaled dataset
    #[arg(short, long, default_value = "output")]
    output: String,

    /// Which report document(s) to produce
    #[arg(long, value_enum, default_value = "both")]
    report: CliReportKind,

    /// Rows sampled per text column during date-pattern classification
    #[arg(long, default_value = "1000")]
    sample_limit: usize,

    /// Number of top categories in count plots and value-count tables
    #[arg(long, default_value = "10")]
    top_n: usize,

    /// Outlier detector sensitivity (columns a row must be flagged in)
    #[arg(long, default_value = "0")]
    outlier_sensitivity: usize,

    /// Skip the destructive encode/scale step of the summary flow
    #[arg(long)]
    no_scale: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the profiling outcome as JSON to stdout instead of a
    /// human-readable summary
    ///
    /// Disables all logs so stdout contains only JSON.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let input = Path::new(&args.input);
    if !input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = ProfilerConfig::builder()
        .output_dir(&args.output)
        .sample_limit(args.sample_limit)
        .top_n(args.top_n)
        .outlier_sensitivity(args.outlier_sensitivity)
        .scale_features(!args.no_scale)
        .report_kind(args.report.into())
        .build()
        .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    let pipeline = ProfilePipeline::new(config)?;
    match pipeline.profile_file(input) {
        Ok(outcome) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_human_readable_summary(&outcome);
            }
            Ok(())
        }
        Err(e) => {
            error!("Profiling failed: {}", e);
            Err(anyhow!("Profiling failed [{}]: {}", e.error_code(), e))
        }
    }
}

/// Print a human-readable summary of the profiling outcome.
///
/// This is the default output; it uses `println!` intentionally since it is
/// the primary product of the run, not a log line.
fn print_human_readable_summary(outcome: &ProfileOutcome) {
    println!();
    println!("{}", "=".repeat(80));
    println!("PROFILING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        outcome.input_file, outcome.shape.0, outcome.shape.1
    );
    println!();

    println!("Column Classification:");
    println!("  Numerical:   {:?}", outcome.classification.numerical);
    println!("  Categorical: {:?}", outcome.classification.categorical);
    println!("  Datetime:    {:?}", outcome.classification.datetime);
    for ambiguous in &outcome.classification.ambiguous {
        println!(
            "  ! Ambiguous '{}': {} sampled rows did not match date patterns (e.g. {:?})",
            ambiguous.column,
            ambiguous.unmatched_rows.len(),
            ambiguous.example_values
        );
    }
    println!();

    println!("Data Quality:");
    if let Some(pct) = outcome.quality.duplicate_percentage {
        println!("  Duplicate rows: {pct:.2}%");
    }
    if let Some(ref percentages) = outcome.quality.null_percentages {
        for entry in percentages.iter().filter(|e| e.percentage > 0.0) {
            println!("  Nulls in '{}': {:.2}%", entry.column, entry.percentage);
        }
    }
    for record in &outcome.quality.outliers {
        if record.outlier_count > 0 {
            println!(
                "  Outliers in '{}': {} rows ({:.1}%)",
                record.column,
                record.outlier_count,
                record.outlier_fraction * 100.0
            );
        }
    }
    println!();

    println!("Artifacts:");
    if let Some(ref path) = outcome.visual_report {
        println!("  Visual report:  {}", path.display());
    }
    if let Some(ref path) = outcome.summary_report {
        println!("  Summary report: {}", path.display());
    }
    if let Some(ref path) = outcome.scaled_output {
        println!("  Scaled dataset: {}", path.display());
    }
    println!("  Charts saved:   {}", outcome.artifacts.len());
    println!();

    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(80));
}
