//! Interface usage rules: which I/O interfaces moved the data.

use crate::loader::{Module, TraceSummary};
use crate::rules::finding::{Category, Finding, Recommendation, Severity, Target};
use crate::rules::thresholds::Thresholds;
use crate::utils::format::{format_bytes, percent};

/// S01: a significant share of the data went through STDIO
pub fn stdio_high_usage(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let total = summary.interface_bytes.total();
    if total == 0 {
        return None;
    }

    let stdio = summary.interface_bytes.stdio;
    if stdio as f64 / total as f64 <= thresholds.interface_stdio {
        return None;
    }

    Some(
        Finding::new(
            "S01",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application is using STDIO, a low-performance interface, for {:.2}% of its data transfers ({})",
                percent(stdio, total),
                format_bytes(stdio)
            ),
        )
        .with_recommendations(vec![Recommendation::text(
            "Consider switching to a high-performance I/O interface such as MPI-IO",
        )]),
    )
}

/// M01: the trace recorded I/O but MPI-IO was never used
pub fn mpiio_not_used(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    // A trace with no recorded modules has no I/O to judge
    if summary.modules.is_empty() || summary.uses(Module::MpiIo) {
        return None;
    }

    Some(
        Finding::new(
            "M01",
            Target::Developer,
            Severity::Warn,
            Category::Operation,
            "Application is using low-performance interface",
        )
        .with_recommendations(vec![Recommendation::text(
            "Consider switching to a high-performance I/O interface such as MPI-IO",
        )]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::InterfaceBytes;

    fn summary_with_bytes(stdio: u64, posix: u64, mpiio: u64) -> TraceSummary {
        let mut summary = TraceSummary {
            interface_bytes: InterfaceBytes {
                stdio,
                posix,
                mpiio,
            },
            ..Default::default()
        };
        summary.modules.insert(Module::Posix);
        summary.modules.insert(Module::Stdio);
        summary
    }

    #[test]
    fn test_stdio_high_usage_fires() {
        let summary = summary_with_bytes(500, 500, 0);
        let finding = stdio_high_usage(&summary, &Thresholds::default()).unwrap();

        assert_eq!(finding.code, "S01");
        assert_eq!(finding.severity, Severity::High);
        assert!(finding.issue.contains("50.00%"));
    }

    #[test]
    fn test_stdio_low_usage_abstains() {
        let summary = summary_with_bytes(5, 995, 0);
        assert!(stdio_high_usage(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_stdio_no_activity_abstains() {
        let summary = TraceSummary::default();
        assert!(stdio_high_usage(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_mpiio_not_used_fires() {
        let summary = summary_with_bytes(0, 1000, 0);
        let finding = mpiio_not_used(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "M01");
        assert_eq!(finding.severity, Severity::Warn);
    }

    #[test]
    fn test_mpiio_present_abstains() {
        let mut summary = summary_with_bytes(0, 600, 400);
        summary.modules.insert(Module::MpiIo);
        assert!(mpiio_not_used(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_mpiio_empty_trace_abstains() {
        let summary = TraceSummary::default();
        assert!(mpiio_not_used(&summary, &Thresholds::default()).is_none());
    }
}
