//! Raw on-disk schema of a trace summary file.
//!
//! The binary trace format is owned by the profiling library; this tool
//! consumes the aggregated JSON export (job metadata plus per-module counter
//! records, one record per file and rank). These structs mirror that layout
//! before any aggregation happens.

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level summary file layout
#[derive(Debug, Clone, Deserialize)]
pub struct RawSummary {
    pub job: RawJob,

    /// Number of compute nodes the job ran on, when the scheduler reported it
    #[serde(default)]
    pub compute_nodes: Option<u64>,

    /// Record id to file path mapping
    #[serde(default)]
    pub name_records: HashMap<String, String>,

    /// Counter records grouped by module name (e.g. "POSIX", "MPI-IO")
    #[serde(default)]
    pub records: HashMap<String, Vec<RawRecord>>,
}

/// Job metadata block
#[derive(Debug, Clone, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub jobid: Option<u64>,

    #[serde(default)]
    pub uid: Option<u64>,

    #[serde(default)]
    pub nprocs: Option<u64>,

    #[serde(default)]
    pub start_time: Option<i64>,

    #[serde(default)]
    pub end_time: Option<i64>,

    #[serde(default)]
    pub executable: Option<String>,

    /// Free-form metadata; the `h` entry carries MPI-IO hints as
    /// `key=value;key=value`
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// One counter record: a single file as seen by one rank
///
/// Rank -1 denotes a shared file accessed collectively by all ranks.
/// Counters may be negative when the profiling library could not determine a
/// value; those are treated as zero during aggregation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub id: u64,

    pub rank: i64,

    #[serde(default)]
    pub counters: HashMap<String, i64>,

    #[serde(default)]
    pub fcounters: HashMap<String, f64>,
}

impl RawRecord {
    /// Integer counter value, clamped to zero when missing or undefined
    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .get(name)
            .copied()
            .filter(|value| *value >= 0)
            .unwrap_or(0) as u64
    }

    /// Float counter value, zero when missing or undefined
    pub fn fcounter(&self, name: &str) -> f64 {
        self.fcounters
            .get(name)
            .copied()
            .filter(|value| *value >= 0.0)
            .unwrap_or(0.0)
    }
}

impl RawJob {
    /// MPI-IO hints split into `key=value` entries
    pub fn hints(&self) -> Vec<String> {
        match self.metadata.get("h") {
            Some(hints) if !hints.is_empty() => hints
                .split(';')
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}
