//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads and aggregates the trace summary
//! 2. Runs the rule catalog against it
//! 3. Assembles the report
//! 4. Exports it to the requested format

use crate::loader::load_summary;
use crate::report::{console, csv, html, svg, ExportFormat, Report, ReportOptions};
use crate::rules::{evaluate, Thresholds};
use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the trace summary JSON file
    pub trace_path: PathBuf,

    /// Formatter options
    pub options: ReportOptions,

    /// Export format
    pub export: ExportFormat,

    /// Output path for file-based export formats
    pub output: Option<PathBuf>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::new(),
            options: ReportOptions::default(),
            export: ExportFormat::Console,
            output: None,
        }
    }
}

/// Validate analyze arguments before doing any work
///
/// **Public** - called from main.rs before execute_analyze
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.trace_path.as_os_str().is_empty() {
        bail!("Trace path is empty");
    }

    if !args.trace_path.exists() {
        bail!("Trace file not found: {}", args.trace_path.display());
    }

    if args.export == ExportFormat::Console && args.output.is_some() {
        bail!("--output only applies to file export formats (html, svg, csv)");
    }

    Ok(())
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace load or validation failures
/// * Output write failures
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Analyzing trace: {}", args.trace_path.display());

    let summary = load_summary(&args.trace_path)
        .with_context(|| format!("Failed to load trace {}", args.trace_path.display()))?;

    debug!(
        "Trace loaded: {} modules, {} files",
        summary.modules.len(),
        summary.files.total
    );

    let thresholds = Thresholds::default();
    thresholds
        .validate()
        .map_err(|reason| anyhow::anyhow!("Invalid thresholds: {}", reason))?;

    let findings = evaluate(&summary, &thresholds);
    info!(
        "Evaluated {} rules, {} findings in {:?}",
        crate::rules::CATALOG.len(),
        findings.len(),
        start_time.elapsed()
    );

    let report = Report::new(&args.trace_path, &summary, findings).with_elapsed(start_time.elapsed());

    match args.export {
        ExportFormat::Console => {
            console::print_report(&report, &args.options);
        }
        ExportFormat::Html => {
            let path = output_path(&args, "html");
            html::write_html(&report, &args.options, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        ExportFormat::Svg => {
            let path = output_path(&args, "svg");
            svg::write_svg(&report, &args.options, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        ExportFormat::Csv => {
            let path = output_path(&args, "csv");
            csv::write_csv(&report, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
    }

    info!("Analysis completed in {:?}", start_time.elapsed());

    Ok(())
}

/// Output path for file export formats, derived from the trace name when
/// none is given
fn output_path(args: &AnalyzeArgs, extension: &str) -> PathBuf {
    match &args.output {
        Some(path) => path.clone(),
        None => args.trace_path.with_extension(extension),
    }
}
