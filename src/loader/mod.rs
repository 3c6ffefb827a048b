//! Trace summary loading and aggregation.
//!
//! This module handles:
//! - Reading the JSON summary exported by the profiling library
//! - Aggregating per-file, per-rank counter records into a `TraceSummary`
//! - Splitting shared-file (rank -1) records from per-rank records

pub mod format;
pub mod summary;

use crate::utils::error::TraceLoadError;
use format::{RawRecord, RawSummary};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Re-export the summary model
pub use summary::{
    FileCount, FileCounts, FileRankSpread, IndependentFileOps, InterfaceBytes, JobInfo, Module,
    MpiioStats, PosixStats, SharedFileStats, TraceSummary,
};

/// Access size histogram bins below 1 MB
const SMALL_READ_BINS: [&str; 5] = [
    "POSIX_SIZE_READ_0_100",
    "POSIX_SIZE_READ_100_1K",
    "POSIX_SIZE_READ_1K_10K",
    "POSIX_SIZE_READ_10K_100K",
    "POSIX_SIZE_READ_100K_1M",
];

const SMALL_WRITE_BINS: [&str; 5] = [
    "POSIX_SIZE_WRITE_0_100",
    "POSIX_SIZE_WRITE_100_1K",
    "POSIX_SIZE_WRITE_1K_10K",
    "POSIX_SIZE_WRITE_10K_100K",
    "POSIX_SIZE_WRITE_100K_1M",
];

/// Load a trace summary file and aggregate it into a `TraceSummary`
///
/// **Public** - main entry point of the loader
///
/// # Errors
/// * `TraceLoadError::Unreadable` - file cannot be opened
/// * `TraceLoadError::JsonError` - file is not valid JSON for the schema
/// * `TraceLoadError::InvalidSummary` - structurally invalid records
pub fn load_summary(path: impl AsRef<Path>) -> Result<TraceSummary, TraceLoadError> {
    let path = path.as_ref();
    debug!("Loading trace summary from: {}", path.display());

    let file = File::open(path)?;
    let raw: RawSummary = serde_json::from_reader(BufReader::new(file))?;

    aggregate(raw)
}

/// Aggregate raw counter records into the typed summary
///
/// **Private** - called by load_summary; exposed to tests through the loader
fn aggregate(raw: RawSummary) -> Result<TraceSummary, TraceLoadError> {
    validate(&raw)?;

    let mut modules = BTreeSet::new();
    for name in raw.records.keys() {
        match Module::from_name(name) {
            Some(module) => {
                modules.insert(module);
            }
            None => warn!("Ignoring records from unsupported module: {}", name),
        }
    }

    let job = JobInfo {
        job_id: raw.job.jobid,
        nprocs: raw.job.nprocs,
        start_time: raw.job.start_time,
        end_time: raw.job.end_time,
        executable: raw.job.executable.clone(),
        hints: raw.job.hints(),
    };

    let stdio_records = records_for(&raw, Module::Stdio);
    let posix_records = records_for(&raw, Module::Posix);
    let mpiio_records = records_for(&raw, Module::MpiIo);

    let stdio_bytes = sum_counters(stdio_records, "STDIO_BYTES_READ")
        + sum_counters(stdio_records, "STDIO_BYTES_WRITTEN");
    let posix_bytes = sum_counters(posix_records, "POSIX_BYTES_READ")
        + sum_counters(posix_records, "POSIX_BYTES_WRITTEN");
    let mpiio_bytes = sum_counters(mpiio_records, "MPIIO_BYTES_READ")
        + sum_counters(mpiio_records, "MPIIO_BYTES_WRITTEN");

    // POSIX captures accesses issued through MPI-IO as well, so the MPI-IO
    // share is subtracted to avoid counting that traffic twice.
    let interface_bytes = InterfaceBytes {
        stdio: stdio_bytes,
        posix: posix_bytes.saturating_sub(mpiio_bytes),
        mpiio: mpiio_bytes,
    };

    let files = count_files(&raw, stdio_records, posix_records, mpiio_records);

    let posix = if modules.contains(&Module::Posix) {
        Some(aggregate_posix(posix_records, &raw.name_records))
    } else {
        None
    };

    let mpiio = if modules.contains(&Module::MpiIo) {
        Some(aggregate_mpiio(mpiio_records, &raw.name_records))
    } else {
        None
    };

    Ok(TraceSummary {
        job,
        modules,
        compute_nodes: raw.compute_nodes,
        files,
        interface_bytes,
        posix,
        mpiio,
    })
}

/// Reject structurally invalid summaries before any aggregation
fn validate(raw: &RawSummary) -> Result<(), TraceLoadError> {
    for (module, records) in &raw.records {
        for record in records {
            if record.rank < -1 {
                return Err(TraceLoadError::InvalidSummary(format!(
                    "{} record {} has invalid rank {}",
                    module, record.id, record.rank
                )));
            }
        }
    }

    if let (Some(start), Some(end)) = (raw.job.start_time, raw.job.end_time) {
        if end < start {
            return Err(TraceLoadError::InvalidSummary(
                "job end time precedes start time".to_string(),
            ));
        }
    }

    Ok(())
}

fn records_for(raw: &RawSummary, module: Module) -> &[RawRecord] {
    raw.records
        .iter()
        .find(|(name, _)| Module::from_name(name) == Some(module))
        .map(|(_, records)| records.as_slice())
        .unwrap_or(&[])
}

fn sum_counters(records: &[RawRecord], name: &str) -> u64 {
    records.iter().map(|record| record.counter(name)).sum()
}

fn max_counter(records: &[RawRecord], name: &str) -> u64 {
    records
        .iter()
        .map(|record| record.counter(name))
        .max()
        .unwrap_or(0)
}

/// Resolve a record id to its file path, falling back to the id itself
fn path_for(name_records: &HashMap<String, String>, id: u64) -> String {
    name_records
        .get(&id.to_string())
        .cloned()
        .unwrap_or_else(|| format!("record {}", id))
}

fn count_files(
    raw: &RawSummary,
    stdio: &[RawRecord],
    posix: &[RawRecord],
    mpiio: &[RawRecord],
) -> FileCounts {
    let distinct = |records: &[RawRecord]| -> HashSet<u64> {
        records.iter().map(|record| record.id).collect()
    };

    let stdio_ids = distinct(stdio);
    let posix_ids = distinct(posix);
    let mpiio_ids = distinct(mpiio);

    let mut all: HashSet<u64> = HashSet::new();
    all.extend(&stdio_ids);
    all.extend(&posix_ids);
    all.extend(&mpiio_ids);

    let total = all.len().max(raw.name_records.len()) as u64;

    FileCounts {
        total,
        stdio: stdio_ids.len() as u64,
        posix: posix_ids.len() as u64,
        mpiio: mpiio_ids.len() as u64,
    }
}

fn aggregate_posix(records: &[RawRecord], name_records: &HashMap<String, String>) -> PosixStats {
    let reads = sum_counters(records, "POSIX_READS");
    let writes = sum_counters(records, "POSIX_WRITES");

    let consecutive_reads = sum_counters(records, "POSIX_CONSEC_READS");
    let consecutive_writes = sum_counters(records, "POSIX_CONSEC_WRITES");

    // The sequential counter includes consecutive accesses
    let sequential_reads =
        sum_counters(records, "POSIX_SEQ_READS").saturating_sub(consecutive_reads);
    let sequential_writes =
        sum_counters(records, "POSIX_SEQ_WRITES").saturating_sub(consecutive_writes);

    let small_sum = |record: &RawRecord, bins: &[&str]| -> u64 {
        bins.iter().map(|bin| record.counter(bin)).sum()
    };

    let mut small_reads_by_id: BTreeMap<u64, u64> = BTreeMap::new();
    let mut small_writes_by_id: BTreeMap<u64, u64> = BTreeMap::new();

    let mut shared_files = Vec::new();
    let mut spreads: BTreeMap<u64, FileRankSpread> = BTreeMap::new();
    let mut meta_times = Vec::new();

    for record in records {
        let record_small_reads = small_sum(record, &SMALL_READ_BINS);
        let record_small_writes = small_sum(record, &SMALL_WRITE_BINS);

        *small_reads_by_id.entry(record.id).or_default() += record_small_reads;
        *small_writes_by_id.entry(record.id).or_default() += record_small_writes;

        meta_times.push(record.fcounter("POSIX_F_META_TIME"));

        if record.rank == -1 {
            shared_files.push(SharedFileStats {
                path: path_for(name_records, record.id),
                reads: record.counter("POSIX_READS"),
                writes: record.counter("POSIX_WRITES"),
                small_reads: record_small_reads,
                small_writes: record_small_writes,
                bytes_read: record.counter("POSIX_BYTES_READ"),
                bytes_written: record.counter("POSIX_BYTES_WRITTEN"),
                fastest_rank_bytes: record.counter("POSIX_FASTEST_RANK_BYTES"),
                slowest_rank_bytes: record.counter("POSIX_SLOWEST_RANK_BYTES"),
                read_time: record.fcounter("POSIX_F_READ_TIME"),
                write_time: record.fcounter("POSIX_F_WRITE_TIME"),
                meta_time: record.fcounter("POSIX_F_META_TIME"),
                fastest_rank_time: record.fcounter("POSIX_F_FASTEST_RANK_TIME"),
                slowest_rank_time: record.fcounter("POSIX_F_SLOWEST_RANK_TIME"),
            });
        } else {
            let bytes_written = record.counter("POSIX_BYTES_WRITTEN");
            let bytes_read = record.counter("POSIX_BYTES_READ");

            let spread = spreads.entry(record.id).or_insert_with(|| FileRankSpread {
                path: path_for(name_records, record.id),
                min_bytes_written: u64::MAX,
                min_bytes_read: u64::MAX,
                ..Default::default()
            });

            spread.max_bytes_written = spread.max_bytes_written.max(bytes_written);
            spread.min_bytes_written = spread.min_bytes_written.min(bytes_written);
            spread.max_bytes_read = spread.max_bytes_read.max(bytes_read);
            spread.min_bytes_read = spread.min_bytes_read.min(bytes_read);
        }
    }

    let per_file_counts = |by_id: BTreeMap<u64, u64>| -> Vec<FileCount> {
        by_id
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(id, count)| FileCount {
                path: path_for(name_records, id),
                count,
            })
            .collect()
    };

    PosixStats {
        reads,
        writes,
        bytes_read: sum_counters(records, "POSIX_BYTES_READ"),
        bytes_written: sum_counters(records, "POSIX_BYTES_WRITTEN"),
        small_reads: small_reads_by_id.values().sum(),
        small_writes: small_writes_by_id.values().sum(),
        small_reads_per_file: per_file_counts(small_reads_by_id),
        small_writes_per_file: per_file_counts(small_writes_by_id),
        mem_not_aligned: sum_counters(records, "POSIX_MEM_NOT_ALIGNED"),
        file_not_aligned: sum_counters(records, "POSIX_FILE_NOT_ALIGNED"),
        max_read_offset: max_counter(records, "POSIX_MAX_BYTE_READ"),
        max_write_offset: max_counter(records, "POSIX_MAX_BYTE_WRITTEN"),
        consecutive_reads,
        sequential_reads,
        consecutive_writes,
        sequential_writes,
        meta_times,
        shared_files,
        per_file_ranks: spreads.into_values().collect(),
    }
}

fn aggregate_mpiio(records: &[RawRecord], name_records: &HashMap<String, String>) -> MpiioStats {
    let mut independent_by_id: BTreeMap<u64, (u64, u64)> = BTreeMap::new();
    let mut has_hdf5_files = false;

    for record in records {
        let entry = independent_by_id.entry(record.id).or_default();
        entry.0 += record.counter("MPIIO_INDEP_READS");
        entry.1 += record.counter("MPIIO_INDEP_WRITES");

        let path = path_for(name_records, record.id);
        if path.ends_with(".h5") || path.ends_with(".hdf5") {
            has_hdf5_files = true;
        }
    }

    let independent_per_file = independent_by_id
        .into_iter()
        .filter(|(_, (reads, writes))| *reads > 0 || *writes > 0)
        .map(|(id, (reads, writes))| IndependentFileOps {
            path: path_for(name_records, id),
            independent_reads: reads,
            independent_writes: writes,
        })
        .collect();

    MpiioStats {
        independent_reads: sum_counters(records, "MPIIO_INDEP_READS"),
        independent_writes: sum_counters(records, "MPIIO_INDEP_WRITES"),
        collective_reads: sum_counters(records, "MPIIO_COLL_READS"),
        collective_writes: sum_counters(records, "MPIIO_COLL_WRITES"),
        nonblocking_reads: sum_counters(records, "MPIIO_NB_READS"),
        nonblocking_writes: sum_counters(records, "MPIIO_NB_WRITES"),
        independent_per_file,
        has_hdf5_files,
    }
}
