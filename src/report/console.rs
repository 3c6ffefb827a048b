//! Styled console report.
//!
//! Renders the report to stdout with severity coloring: red for high,
//! yellow for warnings, cyan for informational findings, and green for
//! confirmations of good behavior.

use crate::report::render::{finding_lines, footer_line, header_lines};
use crate::report::{Report, ReportOptions};
use crate::rules::{Category, Finding, Severity};
use crate::utils::config::{REPORT_VERSION, REPORT_WIDTH};
use console::{style, StyledObject};

/// Print the full report to stdout
///
/// **Public** - console is the default export format
pub fn print_report(report: &Report, options: &ReportOptions) {
    print_header(report);
    print_panel("METADATA", report.findings_in(Category::Metadata), options);
    print_panel("OPERATIONS", report.findings_in(Category::Operation), options);
    print_footer(report);
}

fn print_header(report: &Report) {
    println!("{}", "=".repeat(REPORT_WIDTH));
    println!(
        "{}",
        style(format!(
            "{:^width$}",
            format!("IO INSIGHTS v{}", REPORT_VERSION),
            width = REPORT_WIDTH
        ))
        .bold()
    );
    println!("{}", "=".repeat(REPORT_WIDTH));

    for (label, value) in header_lines(report) {
        println!("  {:<14} {}", style(label).dim(), value);
    }
}

fn print_panel(title: &str, findings: Vec<&Finding>, options: &ReportOptions) {
    println!();
    println!("{}", "-".repeat(REPORT_WIDTH));
    println!("{}", style(title).bold());
    println!("{}", "-".repeat(REPORT_WIDTH));

    if findings.is_empty() {
        println!("  {}", style("nothing to report").dim());
        return;
    }

    for finding in findings {
        for (index, line) in finding_lines(finding, options).iter().enumerate() {
            if index == 0 {
                println!("  {}", colorize(finding.severity, line));
            } else {
                println!("  {}", line);
            }
        }
    }
}

fn print_footer(report: &Report) {
    println!();
    println!("{}", "=".repeat(REPORT_WIDTH));
    println!("  {}", footer_line(report));
    let elapsed = match report.metadata.elapsed {
        Some(elapsed) => format!(" in {:.2?}", elapsed),
        None => String::new(),
    };
    println!(
        "  {}",
        style(format!(
            "generated at {}{}",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            elapsed
        ))
        .dim()
    );
    println!("{}", "=".repeat(REPORT_WIDTH));
}

fn colorize(severity: Severity, line: &str) -> StyledObject<String> {
    let styled = style(line.to_string());
    match severity {
        Severity::High => styled.red().bold(),
        Severity::Warn => styled.yellow(),
        Severity::Info => styled.cyan(),
        Severity::Ok => styled.green(),
    }
}
