use io_insights::loader::{
    IndependentFileOps, JobInfo, Module, MpiioStats, PosixStats, SharedFileStats, TraceSummary,
};
use io_insights::rules::{evaluate, Severity, Thresholds, CATALOG};
use pretty_assertions::assert_eq;

fn with_modules(summary: TraceSummary, modules: &[Module]) -> TraceSummary {
    let mut summary = summary;
    for module in modules {
        summary.modules.insert(*module);
    }
    summary
}

/// A trace that trips several POSIX and MPI-IO rules at once
fn busy_summary() -> TraceSummary {
    let summary = TraceSummary {
        job: JobInfo {
            hints: vec!["cb_nodes=16".to_string()],
            ..Default::default()
        },
        compute_nodes: Some(8),
        posix: Some(PosixStats {
            reads: 500,
            writes: 20000,
            bytes_read: 1 << 20,
            bytes_written: 1 << 30,
            small_writes: 15000,
            mem_not_aligned: 5000,
            shared_files: vec![SharedFileStats {
                path: "/scratch/shared.h5".to_string(),
                bytes_read: 1000,
                bytes_written: 9000,
                fastest_rank_bytes: 100,
                slowest_rank_bytes: 8000,
                ..Default::default()
            }],
            meta_times: vec![60.0],
            ..Default::default()
        }),
        mpiio: Some(MpiioStats {
            independent_writes: 20000,
            independent_per_file: vec![IndependentFileOps {
                path: "/scratch/shared.h5".to_string(),
                independent_reads: 0,
                independent_writes: 20000,
            }],
            has_hdf5_files: true,
            ..Default::default()
        }),
        ..Default::default()
    };

    with_modules(summary, &[Module::Posix, Module::MpiIo])
}

#[test]
fn test_zero_activity_trace_produces_no_findings() {
    let summary = TraceSummary::default();
    let findings = evaluate(&summary, &Thresholds::default());
    assert!(findings.is_empty());
}

#[test]
fn test_evaluation_is_deterministic_across_runs() {
    let summary = busy_summary();
    let thresholds = Thresholds::default();

    let codes = |findings: &[io_insights::rules::Finding]| {
        findings.iter().map(|f| f.code).collect::<Vec<_>>()
    };

    let first = evaluate(&summary, &thresholds);
    for _ in 0..5 {
        let again = evaluate(&summary, &thresholds);
        assert_eq!(codes(&first), codes(&again));
    }
}

#[test]
fn test_busy_summary_fires_expected_rules() {
    let findings = evaluate(&busy_summary(), &Thresholds::default());
    let codes: Vec<_> = findings.iter().map(|f| f.code).collect();

    // operation imbalance, byte imbalance, small writes, misaligned memory
    assert!(codes.contains(&"P01"));
    assert!(codes.contains(&"P03"));
    assert!(codes.contains(&"P06"));
    assert!(codes.contains(&"P07"));
    // straggler imbalance on the shared file, slow metadata ranks
    assert!(codes.contains(&"P18"));
    assert!(codes.contains(&"P17"));
    // independent-only MPI-IO writes, blocking writes, too many aggregators
    assert!(codes.contains(&"M03"));
    assert!(codes.contains(&"M07"));
    assert!(codes.contains(&"M09"));
    // MPI-IO is in use, so M01 stays silent
    assert!(!codes.contains(&"M01"));
}

#[test]
fn test_each_rule_fires_at_most_once() {
    let findings = evaluate(&busy_summary(), &Thresholds::default());
    let mut codes: Vec<_> = findings.iter().map(|f| f.code).collect();
    let before = codes.len();
    codes.dedup();
    assert_eq!(codes.len(), before);
}

#[test]
fn test_findings_keep_catalog_order() {
    let findings = evaluate(&busy_summary(), &Thresholds::default());

    let positions: Vec<usize> = findings
        .iter()
        .map(|finding| {
            CATALOG
                .iter()
                .position(|rule| rule.code == finding.code)
                .unwrap()
        })
        .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_sequential_access_reported_as_ok() {
    let summary = with_modules(
        TraceSummary {
            posix: Some(PosixStats {
                reads: 10000,
                consecutive_reads: 7000,
                sequential_reads: 2500,
                ..Default::default()
            }),
            ..Default::default()
        },
        &[Module::Posix],
    );

    let findings = evaluate(&summary, &Thresholds::default());
    let sequential = findings.iter().find(|f| f.code == "P12").unwrap();
    assert_eq!(sequential.severity, Severity::Ok);
    assert!(findings.iter().all(|f| f.code != "P11"));
}

#[test]
fn test_thresholds_change_rule_outcome() {
    let summary = with_modules(
        TraceSummary {
            posix: Some(PosixStats {
                writes: 10000,
                small_writes: 2000,
                ..Default::default()
            }),
            ..Default::default()
        },
        &[Module::Posix],
    );

    let default_findings = evaluate(&summary, &Thresholds::default());
    assert!(default_findings.iter().any(|f| f.code == "P06"));

    let relaxed = Thresholds {
        small_requests: 0.5,
        ..Default::default()
    };
    let relaxed_findings = evaluate(&summary, &relaxed);
    assert!(relaxed_findings.iter().all(|f| f.code != "P06"));
}
