//! Report assembly and export.
//!
//! A [`Report`] bundles the findings produced by the rule engine with
//! metadata about the analyzed trace. Exporters render it to the console,
//! an HTML page, an SVG panel, or a CSV of fired rule codes.

pub mod console;
pub mod csv;
pub mod html;
pub mod render;
pub mod svg;

use crate::loader::{FileCounts, TraceSummary};
use crate::rules::{Category, Finding, Severity};
use chrono::{DateTime, TimeZone, Utc};
use clap::ValueEnum;
use std::path::Path;

/// Export target for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Styled report on stdout
    Console,
    /// Self-contained HTML page
    Html,
    /// SVG rendering of the report panels
    Svg,
    /// Fired rule codes, one per line
    Csv,
}

/// Formatter knobs, set from the CLI
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Only render the detected issues, hiding their recommendations
    pub issues_only: bool,
    /// Additionally render remediation code snippets
    pub verbose: bool,
    /// Prefix each finding with its rule code (e.g. `[P05]`)
    pub show_code: bool,
    /// Show full file paths in detail lines instead of basenames
    pub full_path: bool,
}

/// Trace facts shown in the report header
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub trace_path: String,
    pub job_id: Option<u64>,
    pub executable: Option<String>,
    pub nprocs: Option<u64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub files: FileCounts,
    /// Names of the instrumentation modules recorded in the trace
    pub modules: Vec<&'static str>,
    pub compute_nodes: Option<u64>,
    pub hints: Vec<String>,
    pub generated_at: DateTime<Utc>,
    /// Wall time spent loading and evaluating the trace
    pub elapsed: Option<std::time::Duration>,
}

/// A fully assembled report, ready for any exporter
#[derive(Debug, Clone)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub findings: Vec<Finding>,
}

impl Report {
    /// Build a report from the analyzed summary and its findings
    pub fn new(trace_path: impl AsRef<Path>, summary: &TraceSummary, findings: Vec<Finding>) -> Self {
        let to_datetime = |seconds: i64| Utc.timestamp_opt(seconds, 0).single();

        Self {
            metadata: ReportMetadata {
                trace_path: trace_path.as_ref().display().to_string(),
                job_id: summary.job.job_id,
                executable: summary.job.executable.clone(),
                nprocs: summary.job.nprocs,
                start_time: summary.job.start_time.and_then(to_datetime),
                end_time: summary.job.end_time.and_then(to_datetime),
                files: summary.files,
                modules: summary.modules.iter().map(|module| module.name()).collect(),
                compute_nodes: summary.compute_nodes,
                hints: summary.job.hints.clone(),
                generated_at: Utc::now(),
                elapsed: None,
            },
            findings,
        }
    }

    pub fn with_elapsed(mut self, elapsed: std::time::Duration) -> Self {
        self.metadata.elapsed = Some(elapsed);
        self
    }

    /// Findings belonging to one report panel, in engine order
    pub fn findings_in(&self, category: Category) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.category == category)
            .collect()
    }

    pub fn critical_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::High)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warn)
            .count()
    }

    /// Total recommendations across all findings, regardless of filtering
    pub fn recommendation_count(&self) -> usize {
        self.findings
            .iter()
            .map(|finding| finding.recommendations.len())
            .sum()
    }

    /// Codes of every fired rule, in engine order
    pub fn codes(&self) -> Vec<&'static str> {
        self.findings.iter().map(|finding| finding.code).collect()
    }
}
