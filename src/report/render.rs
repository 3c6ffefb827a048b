//! Plain-text rendering shared by the exporters.
//!
//! Produces unstyled lines for a finding; the console exporter colors them
//! and the HTML/SVG exporters embed them as-is.

use crate::report::{Report, ReportOptions};
use crate::rules::{Finding, Severity};
use crate::utils::config::DETAILS_MAX_SIZE;

/// Label shown before each finding
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "HIGH",
        Severity::Warn => "WARN",
        Severity::Info => "INFO",
        Severity::Ok => "OK",
    }
}

/// Render one finding to indented plain-text lines
///
/// **Public** - shared by every exporter
///
/// Detail lines are capped at `DETAILS_MAX_SIZE`; a trailing line reports
/// how many were omitted. Recommendations are skipped when `issues_only`
/// is set, and snippets render only in verbose mode.
pub fn finding_lines(finding: &Finding, options: &ReportOptions) -> Vec<String> {
    let mut lines = Vec::new();

    let code = if options.show_code {
        format!("[{}] ", finding.code)
    } else {
        String::new()
    };
    lines.push(format!(
        "[{}] {}{}",
        severity_label(finding.severity),
        code,
        finding.issue
    ));

    for detail in finding.details.iter().take(DETAILS_MAX_SIZE) {
        if options.full_path {
            lines.push(format!("   > {}", detail));
        } else {
            lines.push(format!("   > {}", shorten_quoted_paths(detail)));
        }
    }
    if finding.details.len() > DETAILS_MAX_SIZE {
        lines.push(format!(
            "   > ... and {} more",
            finding.details.len() - DETAILS_MAX_SIZE
        ));
    }

    if !options.issues_only {
        for recommendation in &finding.recommendations {
            lines.push(format!("   - {}", recommendation.message));

            if options.verbose {
                if let Some(snippet) = recommendation.snippet {
                    for snippet_line in snippet.lines() {
                        lines.push(format!("     | {}", snippet_line));
                    }
                }
            }
        }
    }

    lines
}

/// Replace quoted file paths in a detail line with their basenames
///
/// **Private** - detail lines always wrap paths in double quotes
fn shorten_quoted_paths(line: &str) -> String {
    line.split('"')
        .enumerate()
        .map(|(index, part)| {
            if index % 2 == 1 {
                part.rsplit('/').next().unwrap_or(part)
            } else {
                part
            }
        })
        .collect::<Vec<_>>()
        .join("\"")
}

/// Render the header facts as label/value pairs
pub fn header_lines(report: &Report) -> Vec<(String, String)> {
    let metadata = &report.metadata;
    let mut lines = vec![("TRACE".to_string(), metadata.trace_path.clone())];

    if let Some(job_id) = metadata.job_id {
        lines.push(("JOB".to_string(), job_id.to_string()));
    }
    if let Some(executable) = &metadata.executable {
        lines.push(("EXECUTABLE".to_string(), executable.clone()));
    }
    if let Some(nprocs) = metadata.nprocs {
        lines.push(("PROCESSES".to_string(), nprocs.to_string()));
    }
    if let (Some(start), Some(end)) = (metadata.start_time, metadata.end_time) {
        lines.push((
            "PERIOD".to_string(),
            format!(
                "{} to {} ({}s)",
                start.format("%Y-%m-%d %H:%M:%S"),
                end.format("%Y-%m-%d %H:%M:%S"),
                (end - start).num_seconds()
            ),
        ));
    }
    if !metadata.modules.is_empty() {
        lines.push(("MODULES".to_string(), metadata.modules.join(", ")));
    }
    lines.push((
        "FILES".to_string(),
        format!(
            "{} total ({} POSIX, {} MPI-IO, {} STDIO)",
            metadata.files.total, metadata.files.posix, metadata.files.mpiio, metadata.files.stdio
        ),
    ));
    if let Some(nodes) = metadata.compute_nodes {
        lines.push(("COMPUTE NODES".to_string(), nodes.to_string()));
    }
    if !metadata.hints.is_empty() {
        lines.push(("HINTS".to_string(), metadata.hints.join(" ")));
    }

    lines
}

/// Render the footer totals line
pub fn footer_line(report: &Report) -> String {
    format!(
        "{} critical issues, {} warnings, and {} recommendations",
        report.critical_count(),
        report.warning_count(),
        report.recommendation_count()
    )
}
