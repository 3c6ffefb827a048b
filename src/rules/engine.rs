//! Rule catalog and evaluation order.
//!
//! Rules are pure functions over the trace summary. Each rule either fires
//! a single finding or abstains; the catalog order fixes the report order,
//! so evaluating the same summary twice yields the same findings.

use crate::loader::TraceSummary;
use crate::rules::finding::Finding;
use crate::rules::thresholds::Thresholds;
use crate::rules::{interface, mpiio, posix};

/// A catalog entry: a stable code and the check behind it
pub struct Rule {
    pub code: &'static str,
    pub check: fn(&TraceSummary, &Thresholds) -> Option<Finding>,
}

/// Every known rule, in report order
pub const CATALOG: &[Rule] = &[
    Rule { code: "S01", check: interface::stdio_high_usage },
    Rule { code: "M01", check: interface::mpiio_not_used },
    Rule { code: "P01", check: posix::write_count_intensive },
    Rule { code: "P02", check: posix::read_count_intensive },
    Rule { code: "P03", check: posix::write_size_intensive },
    Rule { code: "P04", check: posix::read_size_intensive },
    Rule { code: "P05", check: posix::small_reads },
    Rule { code: "P06", check: posix::small_writes },
    Rule { code: "P07", check: posix::misaligned_memory },
    Rule { code: "P08", check: posix::misaligned_file },
    Rule { code: "P09", check: posix::redundant_reads },
    Rule { code: "P10", check: posix::redundant_writes },
    Rule { code: "P11", check: posix::random_reads },
    Rule { code: "P12", check: posix::sequential_reads },
    Rule { code: "P13", check: posix::random_writes },
    Rule { code: "P14", check: posix::sequential_writes },
    Rule { code: "P15", check: posix::shared_small_reads },
    Rule { code: "P16", check: posix::shared_small_writes },
    Rule { code: "P17", check: posix::long_metadata },
    Rule { code: "P18", check: posix::shared_data_imbalance },
    Rule { code: "P19", check: posix::shared_time_imbalance },
    Rule { code: "P21", check: posix::individual_write_imbalance },
    Rule { code: "P22", check: posix::individual_read_imbalance },
    Rule { code: "M02", check: mpiio::no_collective_reads },
    Rule { code: "M04", check: mpiio::collective_reads_used },
    Rule { code: "M03", check: mpiio::no_collective_writes },
    Rule { code: "M05", check: mpiio::collective_writes_used },
    Rule { code: "M06", check: mpiio::blocking_reads },
    Rule { code: "M07", check: mpiio::blocking_writes },
    Rule { code: "M08", check: mpiio::aggregators_intra_node },
    Rule { code: "M09", check: mpiio::aggregators_inter_node },
    Rule { code: "M10", check: mpiio::aggregators_per_node },
];

/// **Public** - Runs every catalog rule against a trace summary.
///
/// Findings come back in catalog order; rules that abstain contribute
/// nothing.
pub fn evaluate(summary: &TraceSummary, thresholds: &Thresholds) -> Vec<Finding> {
    CATALOG
        .iter()
        .filter_map(|rule| (rule.check)(summary, thresholds))
        .collect()
}
