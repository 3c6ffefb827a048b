//! Strongly typed trace summary model.
//!
//! `TraceSummary` is the immutable snapshot of aggregated I/O statistics the
//! rule engine evaluates. It is built once by the loader and never mutated.

use std::collections::BTreeSet;

/// Instrumentation modules that can appear in a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Module {
    Posix,
    MpiIo,
    Stdio,
    Lustre,
    Hdf5,
}

impl Module {
    /// Map a Darshan module name to its typed variant
    ///
    /// Returns `None` for modules this tool does not evaluate (e.g. DXT).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "POSIX" => Some(Module::Posix),
            "MPI-IO" | "MPIIO" => Some(Module::MpiIo),
            "STDIO" => Some(Module::Stdio),
            "LUSTRE" => Some(Module::Lustre),
            "H5F" | "H5D" | "HDF5" => Some(Module::Hdf5),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Module::Posix => "POSIX",
            Module::MpiIo => "MPI-IO",
            Module::Stdio => "STDIO",
            Module::Lustre => "LUSTRE",
            Module::Hdf5 => "HDF5",
        }
    }
}

/// Job-level metadata recorded alongside the counters
#[derive(Debug, Clone, Default)]
pub struct JobInfo {
    pub job_id: Option<u64>,
    pub nprocs: Option<u64>,
    /// Job start, seconds since the Unix epoch
    pub start_time: Option<i64>,
    /// Job end, seconds since the Unix epoch
    pub end_time: Option<i64>,
    pub executable: Option<String>,
    /// MPI-IO hints as `key=value` entries, in recorded order
    pub hints: Vec<String>,
}

impl JobInfo {
    /// Number of collective buffering aggregator nodes from the `cb_nodes` hint
    pub fn cb_nodes(&self) -> Option<u64> {
        self.hints.iter().find_map(|hint| {
            let (key, value) = hint.split_once('=')?;
            if key == "cb_nodes" {
                value.parse().ok()
            } else {
                None
            }
        })
    }
}

/// Number of files touched through each interface
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCounts {
    pub total: u64,
    pub stdio: u64,
    pub posix: u64,
    pub mpiio: u64,
}

/// Bytes transferred through each interface
///
/// The POSIX share excludes traffic that also went through MPI-IO, since the
/// POSIX module captures those accesses as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceBytes {
    pub stdio: u64,
    pub posix: u64,
    pub mpiio: u64,
}

impl InterfaceBytes {
    pub fn total(&self) -> u64 {
        self.stdio + self.posix + self.mpiio
    }
}

/// Per-file operation count, used for detail lines in findings
#[derive(Debug, Clone, Default)]
pub struct FileCount {
    pub path: String,
    pub count: u64,
}

/// Aggregated counters for one shared file (accessed collectively by all ranks)
#[derive(Debug, Clone, Default)]
pub struct SharedFileStats {
    pub path: String,
    pub reads: u64,
    pub writes: u64,
    pub small_reads: u64,
    pub small_writes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub fastest_rank_bytes: u64,
    pub slowest_rank_bytes: u64,
    pub read_time: f64,
    pub write_time: f64,
    pub meta_time: f64,
    pub fastest_rank_time: f64,
    pub slowest_rank_time: f64,
}

/// Spread of transfer sizes across ranks for one individually opened file
#[derive(Debug, Clone, Default)]
pub struct FileRankSpread {
    pub path: String,
    pub max_bytes_written: u64,
    pub min_bytes_written: u64,
    pub max_bytes_read: u64,
    pub min_bytes_read: u64,
}

/// Aggregated POSIX-level statistics
///
/// Sequential counts exclude consecutive accesses (the raw sequential counter
/// includes them); random counts are whatever remains.
#[derive(Debug, Clone, Default)]
pub struct PosixStats {
    pub reads: u64,
    pub writes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Requests below 1 MB, summed over the access size histogram bins
    pub small_reads: u64,
    pub small_writes: u64,
    pub small_reads_per_file: Vec<FileCount>,
    pub small_writes_per_file: Vec<FileCount>,
    pub mem_not_aligned: u64,
    pub file_not_aligned: u64,
    /// Highest file offset read/written across all files
    pub max_read_offset: u64,
    pub max_write_offset: u64,
    pub consecutive_reads: u64,
    pub sequential_reads: u64,
    pub consecutive_writes: u64,
    pub sequential_writes: u64,
    /// Metadata time per record, seconds
    pub meta_times: Vec<f64>,
    pub shared_files: Vec<SharedFileStats>,
    pub per_file_ranks: Vec<FileRankSpread>,
}

impl PosixStats {
    pub fn total_operations(&self) -> u64 {
        self.reads + self.writes
    }

    pub fn random_reads(&self) -> u64 {
        self.reads
            .saturating_sub(self.consecutive_reads)
            .saturating_sub(self.sequential_reads)
    }

    pub fn random_writes(&self) -> u64 {
        self.writes
            .saturating_sub(self.consecutive_writes)
            .saturating_sub(self.sequential_writes)
    }
}

/// Per-file independent MPI-IO operation counts
#[derive(Debug, Clone, Default)]
pub struct IndependentFileOps {
    pub path: String,
    pub independent_reads: u64,
    pub independent_writes: u64,
}

/// Aggregated MPI-IO-level statistics
#[derive(Debug, Clone, Default)]
pub struct MpiioStats {
    pub independent_reads: u64,
    pub independent_writes: u64,
    pub collective_reads: u64,
    pub collective_writes: u64,
    pub nonblocking_reads: u64,
    pub nonblocking_writes: u64,
    pub independent_per_file: Vec<IndependentFileOps>,
    /// Whether any MPI-IO record points at a `.h5`/`.hdf5` file
    pub has_hdf5_files: bool,
}

impl MpiioStats {
    pub fn total_reads(&self) -> u64 {
        self.independent_reads + self.collective_reads
    }

    pub fn total_writes(&self) -> u64 {
        self.independent_writes + self.collective_writes
    }
}

/// Immutable snapshot of aggregated I/O statistics for one profiled run
///
/// Owned by the loader; read-only to the rule engine.
#[derive(Debug, Clone, Default)]
pub struct TraceSummary {
    pub job: JobInfo,
    pub modules: BTreeSet<Module>,
    pub compute_nodes: Option<u64>,
    pub files: FileCounts,
    pub interface_bytes: InterfaceBytes,
    pub posix: Option<PosixStats>,
    pub mpiio: Option<MpiioStats>,
}

impl TraceSummary {
    pub fn uses(&self, module: Module) -> bool {
        self.modules.contains(&module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_from_name() {
        assert_eq!(Module::from_name("POSIX"), Some(Module::Posix));
        assert_eq!(Module::from_name("MPI-IO"), Some(Module::MpiIo));
        assert_eq!(Module::from_name("H5F"), Some(Module::Hdf5));
        assert_eq!(Module::from_name("DXT_POSIX"), None);
    }

    #[test]
    fn test_cb_nodes_hint() {
        let job = JobInfo {
            hints: vec![
                "romio_no_indep_rw=true".to_string(),
                "cb_nodes=4".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(job.cb_nodes(), Some(4));
    }

    #[test]
    fn test_cb_nodes_missing() {
        let job = JobInfo::default();
        assert_eq!(job.cb_nodes(), None);
    }

    #[test]
    fn test_random_operations_derived() {
        let posix = PosixStats {
            reads: 100,
            consecutive_reads: 40,
            sequential_reads: 35,
            writes: 10,
            consecutive_writes: 10,
            ..Default::default()
        };
        assert_eq!(posix.random_reads(), 25);
        assert_eq!(posix.random_writes(), 0);
    }
}
