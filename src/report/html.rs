//! Self-contained HTML report page.
//!
//! Builds the page as a single string with no external assets so it can be
//! attached to tickets or job logs as-is.

use crate::report::render::{finding_lines, footer_line, header_lines};
use crate::report::{Report, ReportOptions};
use crate::rules::{Category, Finding, Severity};
use crate::utils::config::REPORT_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the report to a standalone HTML page
///
/// **Public** - used by the HTML export format
pub fn generate_html(report: &Report, options: &ReportOptions) -> String {
    let mut page = String::new();

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str(&format!(
        "<title>IO Insights v{} - {}</title>\n",
        REPORT_VERSION,
        escape(&report.metadata.trace_path)
    ));
    page.push_str("<style>\n");
    page.push_str("body { font-family: monospace; background: #1e1e1e; color: #d4d4d4; margin: 2em; }\n");
    page.push_str("h1 { border-bottom: 2px solid #d4d4d4; padding-bottom: 0.3em; }\n");
    page.push_str("h2 { border-bottom: 1px solid #808080; padding-bottom: 0.2em; }\n");
    page.push_str("table.meta td { padding: 0 1em 0 0; }\n");
    page.push_str("td.label { color: #808080; }\n");
    page.push_str(".high { color: #f44747; font-weight: bold; }\n");
    page.push_str(".warn { color: #dcdcaa; }\n");
    page.push_str(".info { color: #4fc1ff; }\n");
    page.push_str(".ok { color: #6a9955; }\n");
    page.push_str("pre { margin: 0.2em 0 0.8em 0; white-space: pre-wrap; }\n");
    page.push_str("footer { margin-top: 2em; border-top: 2px solid #d4d4d4; padding-top: 0.5em; }\n");
    page.push_str("</style>\n</head>\n<body>\n");

    page.push_str(&format!("<h1>IO Insights v{}</h1>\n", REPORT_VERSION));

    page.push_str("<table class=\"meta\">\n");
    for (label, value) in header_lines(report) {
        page.push_str(&format!(
            "<tr><td class=\"label\">{}</td><td>{}</td></tr>\n",
            escape(&label),
            escape(&value)
        ));
    }
    page.push_str("</table>\n");

    push_panel(&mut page, "METADATA", report.findings_in(Category::Metadata), options);
    push_panel(&mut page, "OPERATIONS", report.findings_in(Category::Operation), options);

    page.push_str(&format!(
        "<footer>{}<br>generated at {}</footer>\n",
        escape(&footer_line(report)),
        report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    page.push_str("</body>\n</html>\n");

    page
}

fn push_panel(page: &mut String, title: &str, findings: Vec<&Finding>, options: &ReportOptions) {
    page.push_str(&format!("<h2>{}</h2>\n", title));

    if findings.is_empty() {
        page.push_str("<p class=\"label\">nothing to report</p>\n");
        return;
    }

    for finding in findings {
        let class = severity_class(finding.severity);
        let lines = finding_lines(finding, options);
        page.push_str(&format!(
            "<pre><span class=\"{}\">{}</span>",
            class,
            escape(&lines[0])
        ));
        for line in &lines[1..] {
            page.push('\n');
            page.push_str(&escape(line));
        }
        page.push_str("</pre>\n");
    }
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "high",
        Severity::Warn => "warn",
        Severity::Info => "info",
        Severity::Ok => "ok",
    }
}

/// Escape HTML-significant characters
///
/// **Private** - snippets contain `<` and `&` regularly
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write an HTML report to a file
///
/// **Public** - main entry point for HTML output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_html(
    report: &Report,
    options: &ReportOptions,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing HTML report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let page = generate_html(report, options);

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(page.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("HTML report written successfully ({} bytes)", page.len());

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
pub(crate) fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
