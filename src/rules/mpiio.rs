//! MPI-IO-level rules: collective usage, blocking operations, and
//! collective buffering aggregator placement.

use crate::loader::{Module, TraceSummary};
use crate::rules::finding::{Category, Finding, Recommendation, Severity, Target};
use crate::rules::snippets;
use crate::rules::thresholds::Thresholds;
use crate::utils::format::percent;

/// M02: reads go through MPI-IO but none of them are collective
pub fn no_collective_reads(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let mpiio = summary.mpiio.as_ref()?;
    let total = mpiio.total_reads();

    if mpiio.collective_reads > 0 || total <= thresholds.collective_operations_absolute {
        return None;
    }

    // a file stands out when most of its own operations are independent reads
    let details = mpiio
        .independent_per_file
        .iter()
        .filter_map(|file| {
            let file_ops = file.independent_reads + file.independent_writes;
            if file_ops <= thresholds.collective_operations_absolute
                || file.independent_reads as f64 / file_ops as f64
                    <= thresholds.collective_operations
            {
                return None;
            }
            Some(format!(
                "{} ({:.2}%) independent reads to \"{}\"",
                file.independent_reads,
                percent(file.independent_reads, file_ops),
                file.path
            ))
        })
        .collect();

    Some(
        Finding::new(
            "M02",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application uses MPI-IO but it does not use collective read operations, instead it issues {} ({:.2}%) independent read calls",
                mpiio.independent_reads,
                percent(mpiio.independent_reads, total)
            ),
        )
        .with_details(details)
        .with_recommendations(vec![Recommendation::with_snippet(
            "Use collective read operations (e.g. MPI_File_read_all() or MPI_File_read_at_all()) and set one aggregator per compute node",
            snippets::MPI_IO_COLLECTIVE_READ,
        )]),
    )
}

/// M04: reads go through MPI-IO and collectives are in use
pub fn collective_reads_used(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    let mpiio = summary.mpiio.as_ref()?;
    let total = mpiio.total_reads();

    if total == 0 || mpiio.collective_reads == 0 {
        return None;
    }

    Some(Finding::new(
        "M04",
        Target::Developer,
        Severity::Ok,
        Category::Operation,
        format!(
            "Application uses MPI-IO and read data using {} ({:.2}%) collective operations",
            mpiio.collective_reads,
            percent(mpiio.collective_reads, total)
        ),
    ))
}

/// M03: writes go through MPI-IO but none of them are collective
pub fn no_collective_writes(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let mpiio = summary.mpiio.as_ref()?;
    let total = mpiio.total_writes();

    if mpiio.collective_writes > 0 || total <= thresholds.collective_operations_absolute {
        return None;
    }

    let details = mpiio
        .independent_per_file
        .iter()
        .filter_map(|file| {
            let file_ops = file.independent_reads + file.independent_writes;
            if file_ops <= thresholds.collective_operations_absolute
                || file.independent_writes as f64 / file_ops as f64
                    <= thresholds.collective_operations
            {
                return None;
            }
            Some(format!(
                "{} ({:.2}%) independent writes to \"{}\"",
                file.independent_writes,
                percent(file.independent_writes, file_ops),
                file.path
            ))
        })
        .collect();

    Some(
        Finding::new(
            "M03",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application uses MPI-IO but it does not use collective write operations, instead it issues {} ({:.2}%) independent write calls",
                mpiio.independent_writes,
                percent(mpiio.independent_writes, total)
            ),
        )
        .with_details(details)
        .with_recommendations(vec![Recommendation::with_snippet(
            "Use collective write operations (e.g. MPI_File_write_all() or MPI_File_write_at_all()) and set one aggregator per compute node",
            snippets::MPI_IO_COLLECTIVE_WRITE,
        )]),
    )
}

/// M05: writes go through MPI-IO and collectives are in use
pub fn collective_writes_used(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    let mpiio = summary.mpiio.as_ref()?;
    let total = mpiio.total_writes();

    if total == 0 || mpiio.collective_writes == 0 {
        return None;
    }

    Some(Finding::new(
        "M05",
        Target::Developer,
        Severity::Ok,
        Category::Operation,
        format!(
            "Application uses MPI-IO and write data using {} ({:.2}%) collective operations",
            mpiio.collective_writes,
            percent(mpiio.collective_writes, total)
        ),
    ))
}

fn uses_hdf5(summary: &TraceSummary) -> bool {
    summary.uses(Module::Hdf5)
        || summary
            .mpiio
            .as_ref()
            .map(|mpiio| mpiio.has_hdf5_files)
            .unwrap_or(false)
}

/// M06: MPI-IO reads never overlap with computation
pub fn blocking_reads(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    let mpiio = summary.mpiio.as_ref()?;

    if mpiio.total_reads() == 0 || mpiio.nonblocking_reads > 0 {
        return None;
    }

    let mut recommendations = Vec::new();

    if uses_hdf5(summary) {
        recommendations.push(Recommendation::with_snippet(
            "Since you use HDF5, consider using the ASYNC I/O VOL connector (https://github.com/hpc-io/vol-async)",
            snippets::HDF5_VOL_ASYNC_READ,
        ));
    }

    recommendations.push(Recommendation::with_snippet(
        "Since you use MPI-IO, consider non-blocking/asynchronous I/O operations (e.g., MPI_File_iread(), MPI_File_read_all_begin/end(), or MPI_File_read_at_all_begin/end())",
        snippets::MPI_IO_IREAD,
    ));

    Some(
        Finding::new(
            "M06",
            Target::Developer,
            Severity::Warn,
            Category::Operation,
            "Application could benefit from non-blocking (asynchronous) reads",
        )
        .with_recommendations(recommendations),
    )
}

/// M07: MPI-IO writes never overlap with computation
pub fn blocking_writes(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    let mpiio = summary.mpiio.as_ref()?;

    if mpiio.total_writes() == 0 || mpiio.nonblocking_writes > 0 {
        return None;
    }

    let mut recommendations = Vec::new();

    if uses_hdf5(summary) {
        recommendations.push(Recommendation::with_snippet(
            "Since you use HDF5, consider using the ASYNC I/O VOL connector (https://github.com/hpc-io/vol-async)",
            snippets::HDF5_VOL_ASYNC_WRITE,
        ));
    }

    recommendations.push(Recommendation::with_snippet(
        "Since you use MPI-IO, consider non-blocking/asynchronous I/O operations (e.g., MPI_File_iwrite(), MPI_File_write_all_begin/end(), or MPI_File_write_at_all_begin/end())",
        snippets::MPI_IO_IWRITE,
    ));

    Some(
        Finding::new(
            "M07",
            Target::Developer,
            Severity::Warn,
            Category::Operation,
            "Application could benefit from non-blocking (asynchronous) writes",
        )
        .with_recommendations(recommendations),
    )
}

/// M08: fewer aggregators than compute nodes (intra-node aggregation)
pub fn aggregators_intra_node(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    summary.mpiio.as_ref()?;
    let cb_nodes = summary.job.cb_nodes()?;
    let compute_nodes = summary.compute_nodes?;

    if cb_nodes >= compute_nodes {
        return None;
    }

    Some(Finding::new(
        "M08",
        Target::User,
        Severity::Ok,
        Category::Operation,
        format!(
            "Application is using intra-node aggregators ({} aggregators on {} nodes)",
            cb_nodes, compute_nodes
        ),
    ))
}

/// M09: more aggregators than compute nodes (inter-node aggregation)
pub fn aggregators_inter_node(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    summary.mpiio.as_ref()?;
    let cb_nodes = summary.job.cb_nodes()?;
    let compute_nodes = summary.compute_nodes?;

    if cb_nodes <= compute_nodes {
        return None;
    }

    Some(
        Finding::new(
            "M09",
            Target::User,
            Severity::High,
            Category::Operation,
            format!(
                "Application is using inter-node aggregators ({} aggregators on {} nodes)",
                cb_nodes, compute_nodes
            ),
        )
        .with_recommendations(vec![Recommendation::with_snippet(
            format!(
                "Set the MPI hints for the number of aggregators as one per compute node (e.g., cb_nodes={})",
                compute_nodes
            ),
            snippets::MPI_IO_HINTS,
        )]),
    )
}

/// M10: exactly one aggregator per compute node
pub fn aggregators_per_node(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    summary.mpiio.as_ref()?;
    let cb_nodes = summary.job.cb_nodes()?;
    let compute_nodes = summary.compute_nodes?;

    if cb_nodes != compute_nodes {
        return None;
    }

    Some(Finding::new(
        "M10",
        Target::User,
        Severity::Ok,
        Category::Operation,
        format!(
            "Application is using one aggregator per compute node ({} aggregators on {} nodes)",
            cb_nodes, compute_nodes
        ),
    ))
}
