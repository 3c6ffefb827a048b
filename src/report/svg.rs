//! SVG report rendering.
//!
//! Draws the report as a monospace text panel, line by line, so the image
//! matches the console layout. Manual SVG generation keeps the dependency
//! tree small and the colors under our control.

use crate::report::render::{finding_lines, footer_line, header_lines};
use crate::report::{Report, ReportOptions};
use crate::rules::{Category, Finding, Severity};
use crate::utils::config::REPORT_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const LINE_HEIGHT: usize = 18;
const MARGIN: usize = 20;
const WIDTH: usize = 1000;

/// One positioned line with its fill color
struct SvgLine {
    text: String,
    color: &'static str,
    bold: bool,
}

impl SvgLine {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: "#d4d4d4",
            bold: false,
        }
    }

    fn colored(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            color: severity_color(severity),
            bold: severity == Severity::High,
        }
    }

    fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: "#ffffff",
            bold: true,
        }
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "#f44747",
        Severity::Warn => "#dcdcaa",
        Severity::Info => "#4fc1ff",
        Severity::Ok => "#6a9955",
    }
}

/// Render the report to an SVG document
///
/// **Public** - used by the SVG export format
pub fn generate_svg(report: &Report, options: &ReportOptions) -> String {
    let mut lines = Vec::new();

    lines.push(SvgLine::heading(format!("IO INSIGHTS v{}", REPORT_VERSION)));
    for (label, value) in header_lines(report) {
        lines.push(SvgLine::plain(format!("{:<14} {}", label, value)));
    }

    push_panel(&mut lines, "METADATA", report.findings_in(Category::Metadata), options);
    push_panel(&mut lines, "OPERATIONS", report.findings_in(Category::Operation), options);

    lines.push(SvgLine::plain(String::new()));
    lines.push(SvgLine::heading(footer_line(report)));

    render_document(&lines)
}

fn push_panel(
    lines: &mut Vec<SvgLine>,
    title: &str,
    findings: Vec<&Finding>,
    options: &ReportOptions,
) {
    lines.push(SvgLine::plain(String::new()));
    lines.push(SvgLine::heading(title));

    if findings.is_empty() {
        lines.push(SvgLine::plain("  nothing to report"));
        return;
    }

    for finding in findings {
        for (index, line) in finding_lines(finding, options).into_iter().enumerate() {
            if index == 0 {
                lines.push(SvgLine::colored(format!("  {}", line), finding.severity));
            } else {
                lines.push(SvgLine::plain(format!("  {}", line)));
            }
        }
    }
}

fn render_document(lines: &[SvgLine]) -> String {
    let height = lines.len() * LINE_HEIGHT + 2 * MARGIN;

    let mut svg_content = String::new();
    svg_content.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        WIDTH, height, WIDTH, height
    ));
    svg_content.push('\n');
    // the fill value contains `"#`, which would close a single-hash raw string
    svg_content.push_str(&format!(
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#1e1e1e"/>"##,
        WIDTH, height
    ));
    svg_content.push('\n');
    svg_content.push_str(r#"<style>text { font: 13px monospace; white-space: pre; }</style>"#);
    svg_content.push('\n');

    for (index, line) in lines.iter().enumerate() {
        if line.text.is_empty() {
            continue;
        }
        let y = MARGIN + (index + 1) * LINE_HEIGHT;
        let weight = if line.bold { r#" font-weight="bold""# } else { "" };
        svg_content.push_str(&format!(
            r#"<text x="{}" y="{}" fill="{}" xml:space="preserve"{}>{}</text>"#,
            MARGIN,
            y,
            line.color,
            weight,
            escape(&line.text)
        ));
        svg_content.push('\n');
    }

    svg_content.push_str("</svg>\n");
    svg_content
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write an SVG report to a file
///
/// **Public** - main entry point for SVG output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(
    report: &Report,
    options: &ReportOptions,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG report to: {}", output_path.display());

    crate::report::html::validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory: {}", e))
            })?;
        }
    }

    let svg_content = generate_svg(report, options);

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "SVG report written successfully ({} bytes, {:.2} KB)",
        svg_content.len(),
        svg_content.len() as f64 / 1024.0
    );

    Ok(())
}
