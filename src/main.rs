//! IO Insights CLI
//!
//! Analyzes an aggregated I/O trace summary and reports detected
//! performance issues with actionable recommendations.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use io_insights::commands::{execute_analyze, validate_args, AnalyzeArgs};
use io_insights::report::{ExportFormat, ReportOptions};

/// IO Insights - I/O performance issue detection for parallel applications
#[derive(Parser, Debug)]
#[command(name = "io-insights")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the trace summary JSON file
    trace: PathBuf,

    /// Only display the detected issues and hide the recommendations
    #[arg(long)]
    issues: bool,

    /// Display extended details, including remediation code snippets
    #[arg(short, long)]
    verbose: bool,

    /// Display the rule code of each issue (e.g. [P05])
    #[arg(long)]
    code: bool,

    /// Display full file paths in detail lines instead of basenames
    #[arg(long)]
    path: bool,

    /// Export format for the report
    #[arg(long, value_enum, default_value = "console")]
    export: ExportFormat,

    /// Output path for file export formats (defaults to the trace name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Create analyze args
    let args = AnalyzeArgs {
        trace_path: cli.trace,
        options: ReportOptions {
            issues_only: cli.issues,
            verbose: cli.verbose,
            show_code: cli.code,
            full_path: cli.path,
        },
        export: cli.export,
        output: cli.output,
    };

    // Validate args first
    validate_args(&args)?;

    // Execute analysis
    execute_analyze(args)?;

    Ok(())
}
