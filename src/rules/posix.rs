//! POSIX-level rules: access sizes, alignment, access patterns, metadata
//! cost, and rank imbalance.
//!
//! Every rule abstains when the POSIX module is absent from the trace.

use crate::loader::{Module, PosixStats, TraceSummary};
use crate::rules::finding::{Category, Finding, Recommendation, Severity, Target};
use crate::rules::snippets;
use crate::rules::thresholds::Thresholds;
use crate::utils::format::percent;

/// P01: more write than read operations by a significant margin
pub fn write_count_intensive(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;
    let total = posix.total_operations();

    if total == 0 || posix.writes <= posix.reads {
        return None;
    }
    if posix.writes.abs_diff(posix.reads) as f64 / total as f64 <= thresholds.imbalance_operations {
        return None;
    }

    Some(Finding::new(
        "P01",
        Target::Developer,
        Severity::Info,
        Category::Metadata,
        format!(
            "Application is write operation intensive ({:.2}% writes vs. {:.2}% reads)",
            percent(posix.writes, total),
            percent(posix.reads, total)
        ),
    ))
}

/// P02: more read than write operations by a significant margin
pub fn read_count_intensive(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;
    let total = posix.total_operations();

    if total == 0 || posix.reads <= posix.writes {
        return None;
    }
    if posix.reads.abs_diff(posix.writes) as f64 / total as f64 <= thresholds.imbalance_operations {
        return None;
    }

    Some(Finding::new(
        "P02",
        Target::Developer,
        Severity::Info,
        Category::Metadata,
        format!(
            "Application is read operation intensive ({:.2}% writes vs. {:.2}% reads)",
            percent(posix.writes, total),
            percent(posix.reads, total)
        ),
    ))
}

/// P03: more bytes written than read by a significant margin
pub fn write_size_intensive(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;
    let total = posix.bytes_read + posix.bytes_written;

    if total == 0 || posix.bytes_written <= posix.bytes_read {
        return None;
    }
    if posix.bytes_written.abs_diff(posix.bytes_read) as f64 / total as f64
        <= thresholds.imbalance_operations
    {
        return None;
    }

    Some(Finding::new(
        "P03",
        Target::Developer,
        Severity::Info,
        Category::Metadata,
        format!(
            "Application is write size intensive ({:.2}% write vs. {:.2}% read)",
            percent(posix.bytes_written, total),
            percent(posix.bytes_read, total)
        ),
    ))
}

/// P04: more bytes read than written by a significant margin
pub fn read_size_intensive(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;
    let total = posix.bytes_read + posix.bytes_written;

    if total == 0 || posix.bytes_read <= posix.bytes_written {
        return None;
    }
    if posix.bytes_read.abs_diff(posix.bytes_written) as f64 / total as f64
        <= thresholds.imbalance_operations
    {
        return None;
    }

    Some(Finding::new(
        "P04",
        Target::Developer,
        Severity::Info,
        Category::Metadata,
        format!(
            "Application is read size intensive ({:.2}% write vs. {:.2}% read)",
            percent(posix.bytes_written, total),
            percent(posix.bytes_read, total)
        ),
    ))
}

/// Recommendations shared by the small-request rules
fn small_request_recommendations(
    summary: &TraceSummary,
    operation: &str,
    collective_snippet: &'static str,
) -> Vec<Recommendation> {
    let mut recommendations = vec![Recommendation::text(format!(
        "Consider buffering {} operations into larger more contiguous ones",
        operation
    ))];

    if summary.uses(Module::MpiIo) {
        recommendations.push(Recommendation::with_snippet(
            format!(
                "Since the application already uses MPI-IO, consider using collective I/O calls (e.g. MPI_File_{0}_all() or MPI_File_{0}_at_all()) to aggregate requests into larger ones",
                operation
            ),
            collective_snippet,
        ));
    } else {
        recommendations.push(Recommendation::text(
            "Application does not use MPI-IO for operations, consider use this interface instead to harness collective operations",
        ));
    }

    recommendations
}

/// P05: excessive number of small (< 1 MB) read requests
pub fn small_reads(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.small_reads == 0 || posix.reads == 0 {
        return None;
    }
    if posix.small_reads as f64 / posix.reads as f64 <= thresholds.small_requests
        || posix.small_reads <= thresholds.small_requests_absolute
    {
        return None;
    }

    // Name the files responsible for a substantial share of the small requests
    let details = posix
        .small_reads_per_file
        .iter()
        .filter(|file| file.count as f64 > posix.reads as f64 * thresholds.small_requests / 2.0)
        .map(|file| {
            format!(
                "{} ({:.2}%) small read requests are to \"{}\"",
                file.count,
                percent(file.count, posix.reads),
                file.path
            )
        })
        .collect();

    Some(
        Finding::new(
            "P05",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application issues a high number ({}) of small read requests (i.e., < 1MB) which represents {:.2}% of all read requests",
                posix.small_reads,
                percent(posix.small_reads, posix.reads)
            ),
        )
        .with_details(details)
        .with_recommendations(small_request_recommendations(
            summary,
            "read",
            snippets::MPI_IO_COLLECTIVE_READ,
        )),
    )
}

/// P06: excessive number of small (< 1 MB) write requests
pub fn small_writes(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.small_writes == 0 || posix.writes == 0 {
        return None;
    }
    if posix.small_writes as f64 / posix.writes as f64 <= thresholds.small_requests
        || posix.small_writes <= thresholds.small_requests_absolute
    {
        return None;
    }

    let details = posix
        .small_writes_per_file
        .iter()
        .filter(|file| file.count as f64 > posix.writes as f64 * thresholds.small_requests / 2.0)
        .map(|file| {
            format!(
                "{} ({:.2}%) small write requests are to \"{}\"",
                file.count,
                percent(file.count, posix.writes),
                file.path
            )
        })
        .collect();

    Some(
        Finding::new(
            "P06",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application issues a high number ({}) of small write requests (i.e., < 1MB) which represents {:.2}% of all write requests",
                posix.small_writes,
                percent(posix.small_writes, posix.writes)
            ),
        )
        .with_details(details)
        .with_recommendations(small_request_recommendations(
            summary,
            "write",
            snippets::MPI_IO_COLLECTIVE_WRITE,
        )),
    )
}

/// P07: excessive misaligned memory requests
pub fn misaligned_memory(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;
    let total = posix.total_operations();

    if total == 0 {
        return None;
    }
    if posix.mem_not_aligned as f64 / total as f64 <= thresholds.misaligned_requests {
        return None;
    }

    Some(Finding::new(
        "P07",
        Target::Developer,
        Severity::High,
        Category::Metadata,
        format!(
            "Application has a high number ({:.2}%) of misaligned memory requests",
            percent(posix.mem_not_aligned, total)
        ),
    ))
}

/// P08: excessive misaligned file requests
pub fn misaligned_file(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;
    let total = posix.total_operations();

    if total == 0 {
        return None;
    }
    if posix.file_not_aligned as f64 / total as f64 <= thresholds.misaligned_requests {
        return None;
    }

    let mut recommendations = vec![Recommendation::text(
        "Consider aligning the requests to the file system block boundaries",
    )];

    if summary.uses(Module::Hdf5) {
        recommendations.push(Recommendation::with_snippet(
            "Since the application uses HDF5, consider using H5Pset_alignment() in a file access property list",
            snippets::HDF5_ALIGNMENT,
        ));
        recommendations.push(Recommendation::text(
            "Any file object greater than or equal in size to threshold bytes will be aligned on an address which is a multiple of alignment",
        ));
    }

    if summary.uses(Module::Lustre) {
        recommendations.push(Recommendation::with_snippet(
            "Consider using a Lustre alignment that matches the file system stripe configuration",
            snippets::LUSTRE_STRIPING,
        ));
    }

    Some(
        Finding::new(
            "P08",
            Target::Developer,
            Severity::High,
            Category::Metadata,
            format!(
                "Application issues a high number ({:.2}%) of misaligned file requests",
                percent(posix.file_not_aligned, total)
            ),
        )
        .with_recommendations(recommendations),
    )
}

/// P09: more data read than the highest offset touched
pub fn redundant_reads(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.max_read_offset <= posix.bytes_read {
        return None;
    }

    Some(Finding::new(
        "P09",
        Target::Developer,
        Severity::Warn,
        Category::Metadata,
        "Application might have redundant read traffic (more data read than the highest offset)",
    ))
}

/// P10: more data written than the highest offset touched
pub fn redundant_writes(summary: &TraceSummary, _thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.max_write_offset <= posix.bytes_written {
        return None;
    }

    Some(Finding::new(
        "P10",
        Target::Developer,
        Severity::Warn,
        Category::Metadata,
        "Application might have redundant write traffic (more data written than the highest offset)",
    ))
}

fn random_reads_excessive(posix: &PosixStats, thresholds: &Thresholds) -> bool {
    let random = posix.random_reads();
    random > 0
        && random as f64 / posix.reads as f64 > thresholds.random_operations
        && random > thresholds.random_operations_absolute
}

fn random_writes_excessive(posix: &PosixStats, thresholds: &Thresholds) -> bool {
    let random = posix.random_writes();
    random > 0
        && random as f64 / posix.writes as f64 > thresholds.random_operations
        && random > thresholds.random_operations_absolute
}

/// P11: excessive random read accesses
pub fn random_reads(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.reads == 0 || !random_reads_excessive(posix, thresholds) {
        return None;
    }

    Some(
        Finding::new(
            "P11",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application is issuing a high number ({}) of random read operations ({:.2}%)",
                posix.random_reads(),
                percent(posix.random_reads(), posix.reads)
            ),
        )
        .with_recommendations(vec![Recommendation::text(
            "Consider changing your data model to have consecutive or sequential reads",
        )]),
    )
}

/// P12: reads are mostly consecutive or sequential
pub fn sequential_reads(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.reads == 0 || random_reads_excessive(posix, thresholds) {
        return None;
    }

    Some(Finding::new(
        "P12",
        Target::Developer,
        Severity::Ok,
        Category::Operation,
        format!(
            "Application mostly uses consecutive ({:.2}%) and sequential ({:.2}%) read requests",
            percent(posix.consecutive_reads, posix.reads),
            percent(posix.sequential_reads, posix.reads)
        ),
    ))
}

/// P13: excessive random write accesses
pub fn random_writes(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.writes == 0 || !random_writes_excessive(posix, thresholds) {
        return None;
    }

    Some(
        Finding::new(
            "P13",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application is issuing a high number ({}) of random write operations ({:.2}%)",
                posix.random_writes(),
                percent(posix.random_writes(), posix.writes)
            ),
        )
        .with_recommendations(vec![Recommendation::text(
            "Consider changing your data model to have consecutive or sequential writes",
        )]),
    )
}

/// P14: writes are mostly consecutive or sequential
pub fn sequential_writes(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    if posix.writes == 0 || random_writes_excessive(posix, thresholds) {
        return None;
    }

    Some(Finding::new(
        "P14",
        Target::Developer,
        Severity::Ok,
        Category::Operation,
        format!(
            "Application mostly uses consecutive ({:.2}%) and sequential ({:.2}%) write requests",
            percent(posix.consecutive_writes, posix.writes),
            percent(posix.sequential_writes, posix.writes)
        ),
    ))
}

/// P15: excessive small read requests against shared files
pub fn shared_small_reads(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let shared_reads: u64 = posix.shared_files.iter().map(|file| file.reads).sum();
    let shared_small: u64 = posix.shared_files.iter().map(|file| file.small_reads).sum();

    if shared_reads == 0 {
        return None;
    }
    if shared_small as f64 / shared_reads as f64 <= thresholds.small_requests
        || shared_small <= thresholds.small_requests_absolute
    {
        return None;
    }

    let details = posix
        .shared_files
        .iter()
        .filter(|file| file.small_reads as f64 > shared_reads as f64 * thresholds.small_requests / 2.0)
        .map(|file| {
            format!(
                "{} ({:.2}%) small read requests are to \"{}\"",
                file.small_reads,
                percent(file.small_reads, shared_reads),
                file.path
            )
        })
        .collect();

    Some(
        Finding::new(
            "P15",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application issues a high number ({}) of small read requests to a shared file (i.e., < 1MB) which represents {:.2}% of all shared file read requests",
                shared_small,
                percent(shared_small, shared_reads)
            ),
        )
        .with_details(details)
        .with_recommendations(vec![Recommendation::with_snippet(
            "Consider coalescing read requests into larger more contiguous ones using MPI-IO collective operations",
            snippets::MPI_IO_COLLECTIVE_READ,
        )]),
    )
}

/// P16: excessive small write requests against shared files
pub fn shared_small_writes(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let shared_writes: u64 = posix.shared_files.iter().map(|file| file.writes).sum();
    let shared_small: u64 = posix
        .shared_files
        .iter()
        .map(|file| file.small_writes)
        .sum();

    if shared_writes == 0 {
        return None;
    }
    if shared_small as f64 / shared_writes as f64 <= thresholds.small_requests
        || shared_small <= thresholds.small_requests_absolute
    {
        return None;
    }

    let details = posix
        .shared_files
        .iter()
        .filter(|file| {
            file.small_writes as f64 > shared_writes as f64 * thresholds.small_requests / 2.0
        })
        .map(|file| {
            format!(
                "{} ({:.2}%) small write requests are to \"{}\"",
                file.small_writes,
                percent(file.small_writes, shared_writes),
                file.path
            )
        })
        .collect();

    Some(
        Finding::new(
            "P16",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Application issues a high number ({}) of small write requests to a shared file (i.e., < 1MB) which represents {:.2}% of all shared file write requests",
                shared_small,
                percent(shared_small, shared_writes)
            ),
        )
        .with_details(details)
        .with_recommendations(vec![Recommendation::with_snippet(
            "Consider coalescing write requests into larger more contiguous ones using MPI-IO collective operations",
            snippets::MPI_IO_COLLECTIVE_WRITE,
        )]),
    )
}

/// P17: ranks spending excessive time in metadata operations
pub fn long_metadata(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let count = posix
        .meta_times
        .iter()
        .filter(|time| **time > thresholds.metadata_time_rank)
        .count();

    if count == 0 {
        return None;
    }

    let mut recommendations = vec![Recommendation::text(
        "Attempt to combine files, reduce, or cache metadata operations",
    )];

    if summary.uses(Module::Hdf5) {
        recommendations.push(Recommendation::with_snippet(
            "Since the application uses HDF5, try enabling collective metadata calls with H5Pset_coll_metadata_write() and H5Pset_all_coll_metadata_ops()",
            snippets::HDF5_COLLECTIVE_METADATA,
        ));
        recommendations.push(Recommendation::with_snippet(
            "Since the application uses HDF5, try using metadata cache to defer metadata operations",
            snippets::HDF5_CACHE,
        ));
    }

    Some(
        Finding::new(
            "P17",
            Target::Developer,
            Severity::High,
            Category::Metadata,
            format!(
                "There are {} ranks where metadata operations take over {} seconds",
                count, thresholds.metadata_time_rank
            ),
        )
        .with_recommendations(recommendations),
    )
}

/// P18: data transfer imbalance across ranks on shared files
pub fn shared_data_imbalance(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let mut details = Vec::new();

    for file in &posix.shared_files {
        let transfer = file.bytes_read + file.bytes_written;
        if transfer == 0 {
            continue;
        }

        let spread = file.slowest_rank_bytes.abs_diff(file.fastest_rank_bytes);
        let imbalance = spread as f64 / transfer as f64;
        if imbalance > thresholds.imbalance_stragglers {
            details.push(format!(
                "Load imbalance of {:.2}% detected while accessing \"{}\"",
                imbalance * 100.0,
                file.path
            ));
        }
    }

    if details.is_empty() {
        return None;
    }

    let count = details.len();
    Some(
        Finding::new(
            "P18",
            Target::User,
            Severity::High,
            Category::Operation,
            format!(
                "Detected data transfer imbalance caused by stragglers when accessing {} shared file.",
                count
            ),
        )
        .with_details(details)
        .with_recommendations(vec![
            Recommendation::text(
                "Consider better balancing the data transfer between the application ranks",
            ),
            Recommendation::with_snippet(
                "Consider tuning how your data is distributed in the file system by changing the stripe size and count",
                snippets::LUSTRE_STRIPING,
            ),
        ]),
    )
}

/// P19: time imbalance across ranks on shared files
pub fn shared_time_imbalance(summary: &TraceSummary, thresholds: &Thresholds) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let mut details = Vec::new();

    for file in &posix.shared_files {
        let total_time = file.write_time + file.read_time + file.meta_time;
        if total_time <= 0.0 {
            continue;
        }

        let spread = (file.slowest_rank_time - file.fastest_rank_time).abs();
        let imbalance = spread / total_time;
        if imbalance > thresholds.imbalance_stragglers {
            details.push(format!(
                "Load imbalance of {:.2}% detected while accessing \"{}\"",
                imbalance * 100.0,
                file.path
            ));
        }
    }

    if details.is_empty() {
        return None;
    }

    let count = details.len();
    Some(
        Finding::new(
            "P19",
            Target::User,
            Severity::High,
            Category::Operation,
            format!(
                "Detected time imbalance caused by stragglers when accessing {} shared file.",
                count
            ),
        )
        .with_details(details)
        .with_recommendations(vec![
            Recommendation::text("Consider better distributing the data in the parallel file system"),
            Recommendation::with_snippet(
                "Consider tuning how your data is distributed in the file system by changing the stripe size and count",
                snippets::LUSTRE_STRIPING,
            ),
        ]),
    )
}

/// Recommendations shared by the individual-file imbalance rules
fn individual_imbalance_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation::text(
            "Consider better balancing the data transfer between the application ranks",
        ),
        Recommendation::with_snippet(
            "Consider tuning the stripe size and count to better distribute the data",
            snippets::LUSTRE_STRIPING,
        ),
        Recommendation::text(
            "If the application uses netCDF and HDF5 double-check the need to set NO_FILL values",
        ),
        Recommendation::text(
            "If rank 0 is the only one opening the file, consider using MPI-IO collectives",
        ),
    ]
}

/// P21: write imbalance across ranks on individually opened files
pub fn individual_write_imbalance(
    summary: &TraceSummary,
    thresholds: &Thresholds,
) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let mut details = Vec::new();

    for file in &posix.per_file_ranks {
        if file.max_bytes_written == 0 {
            continue;
        }

        let spread = file.max_bytes_written.abs_diff(file.min_bytes_written);
        let imbalance = spread as f64 / file.max_bytes_written as f64;
        if imbalance > thresholds.imbalance_size {
            details.push(format!(
                "Load imbalance of {:.2}% detected while accessing \"{}\"",
                imbalance * 100.0,
                file.path
            ));
        }
    }

    if details.is_empty() {
        return None;
    }

    let count = details.len();
    Some(
        Finding::new(
            "P21",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Detected write imbalance when accessing {} individual files",
                count
            ),
        )
        .with_details(details)
        .with_recommendations(individual_imbalance_recommendations()),
    )
}

/// P22: read imbalance across ranks on individually opened files
pub fn individual_read_imbalance(
    summary: &TraceSummary,
    thresholds: &Thresholds,
) -> Option<Finding> {
    let posix = summary.posix.as_ref()?;

    let mut details = Vec::new();

    for file in &posix.per_file_ranks {
        if file.max_bytes_read == 0 {
            continue;
        }

        let spread = file.max_bytes_read.abs_diff(file.min_bytes_read);
        let imbalance = spread as f64 / file.max_bytes_read as f64;
        if imbalance > thresholds.imbalance_size {
            details.push(format!(
                "Load imbalance of {:.2}% detected while accessing \"{}\"",
                imbalance * 100.0,
                file.path
            ));
        }
    }

    if details.is_empty() {
        return None;
    }

    let count = details.len();
    Some(
        Finding::new(
            "P22",
            Target::Developer,
            Severity::High,
            Category::Operation,
            format!(
                "Detected read imbalance when accessing {} individual files.",
                count
            ),
        )
        .with_details(details)
        .with_recommendations(individual_imbalance_recommendations()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{FileCount, FileRankSpread, SharedFileStats};

    fn posix_summary(posix: PosixStats) -> TraceSummary {
        let mut summary = TraceSummary {
            posix: Some(posix),
            ..Default::default()
        };
        summary.modules.insert(Module::Posix);
        summary
    }

    #[test]
    fn test_write_count_intensive_fires() {
        let summary = posix_summary(PosixStats {
            reads: 10,
            writes: 90,
            ..Default::default()
        });

        let finding = write_count_intensive(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P01");
        assert_eq!(finding.severity, Severity::Info);
        assert!(read_count_intensive(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_balanced_operations_abstain() {
        let summary = posix_summary(PosixStats {
            reads: 52,
            writes: 48,
            ..Default::default()
        });

        assert!(write_count_intensive(&summary, &Thresholds::default()).is_none());
        assert!(read_count_intensive(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_read_size_intensive_fires() {
        let summary = posix_summary(PosixStats {
            bytes_read: 900,
            bytes_written: 100,
            ..Default::default()
        });

        let finding = read_size_intensive(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P04");
    }

    #[test]
    fn test_small_writes_fires_with_details() {
        let summary = posix_summary(PosixStats {
            writes: 2000,
            small_writes: 1840,
            small_writes_per_file: vec![FileCount {
                path: "/scratch/out/tiny.dat".to_string(),
                count: 1800,
            }],
            ..Default::default()
        });

        let finding = small_writes(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P06");
        assert_eq!(finding.severity, Severity::High);
        assert!(finding.issue.contains("92.00%"));
        assert_eq!(finding.details.len(), 1);
        assert!(finding.details[0].contains("tiny.dat"));
        // POSIX-only trace: the MPI-IO suggestion is textual, no snippet
        assert!(finding
            .recommendations
            .iter()
            .all(|rec| rec.snippet.is_none()));
    }

    #[test]
    fn test_small_writes_below_absolute_abstains() {
        let summary = posix_summary(PosixStats {
            writes: 100,
            small_writes: 90,
            ..Default::default()
        });

        assert!(small_writes(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_small_reads_with_mpiio_snippet() {
        let mut summary = posix_summary(PosixStats {
            reads: 5000,
            small_reads: 4000,
            ..Default::default()
        });
        summary.modules.insert(Module::MpiIo);

        let finding = small_reads(&summary, &Thresholds::default()).unwrap();
        assert!(finding
            .recommendations
            .iter()
            .any(|rec| rec.snippet.is_some()));
    }

    #[test]
    fn test_misaligned_rules() {
        let summary = posix_summary(PosixStats {
            reads: 100,
            writes: 100,
            mem_not_aligned: 50,
            file_not_aligned: 10,
            ..Default::default()
        });

        let finding = misaligned_memory(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P07");
        assert!(misaligned_file(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_misaligned_file_lustre_recommendation() {
        let mut summary = posix_summary(PosixStats {
            reads: 100,
            writes: 0,
            file_not_aligned: 40,
            ..Default::default()
        });
        summary.modules.insert(Module::Lustre);

        let finding = misaligned_file(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P08");
        assert!(finding
            .recommendations
            .iter()
            .any(|rec| rec.message.contains("Lustre")));
    }

    #[test]
    fn test_redundant_traffic() {
        let summary = posix_summary(PosixStats {
            bytes_read: 100,
            max_read_offset: 500,
            bytes_written: 500,
            max_write_offset: 100,
            ..Default::default()
        });

        assert_eq!(
            redundant_reads(&summary, &Thresholds::default())
                .unwrap()
                .code,
            "P09"
        );
        assert!(redundant_writes(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_random_vs_sequential_reads() {
        let random_heavy = posix_summary(PosixStats {
            reads: 10000,
            consecutive_reads: 1000,
            sequential_reads: 1000,
            ..Default::default()
        });

        assert_eq!(
            random_reads(&random_heavy, &Thresholds::default())
                .unwrap()
                .code,
            "P11"
        );
        assert!(sequential_reads(&random_heavy, &Thresholds::default()).is_none());

        let sequential_heavy = posix_summary(PosixStats {
            reads: 10000,
            consecutive_reads: 6000,
            sequential_reads: 3500,
            ..Default::default()
        });

        assert!(random_reads(&sequential_heavy, &Thresholds::default()).is_none());
        let finding = sequential_reads(&sequential_heavy, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P12");
        assert_eq!(finding.severity, Severity::Ok);
    }

    #[test]
    fn test_no_reads_no_pattern_finding() {
        let summary = posix_summary(PosixStats::default());
        assert!(random_reads(&summary, &Thresholds::default()).is_none());
        assert!(sequential_reads(&summary, &Thresholds::default()).is_none());
        assert!(random_writes(&summary, &Thresholds::default()).is_none());
        assert!(sequential_writes(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_shared_small_writes() {
        let summary = posix_summary(PosixStats {
            shared_files: vec![SharedFileStats {
                path: "/scratch/shared.out".to_string(),
                writes: 4000,
                small_writes: 3000,
                ..Default::default()
            }],
            ..Default::default()
        });

        let finding = shared_small_writes(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P16");
        assert_eq!(finding.details.len(), 1);
    }

    #[test]
    fn test_long_metadata() {
        let summary = posix_summary(PosixStats {
            meta_times: vec![0.5, 45.0, 31.0, 2.0],
            ..Default::default()
        });

        let finding = long_metadata(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P17");
        assert!(finding.issue.contains("2 ranks"));
    }

    #[test]
    fn test_shared_data_imbalance() {
        let summary = posix_summary(PosixStats {
            shared_files: vec![SharedFileStats {
                path: "/scratch/shared.out".to_string(),
                bytes_read: 500,
                bytes_written: 500,
                fastest_rank_bytes: 10,
                slowest_rank_bytes: 400,
                ..Default::default()
            }],
            ..Default::default()
        });

        let finding = shared_data_imbalance(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P18");
        assert_eq!(finding.target, Target::User);
        assert!(finding.details[0].contains("39.00%"));
    }

    #[test]
    fn test_shared_time_imbalance() {
        let summary = posix_summary(PosixStats {
            shared_files: vec![SharedFileStats {
                path: "/scratch/shared.out".to_string(),
                read_time: 5.0,
                write_time: 4.0,
                meta_time: 1.0,
                fastest_rank_time: 1.0,
                slowest_rank_time: 9.0,
                ..Default::default()
            }],
            ..Default::default()
        });

        let finding = shared_time_imbalance(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P19");
    }

    #[test]
    fn test_individual_imbalance() {
        let summary = posix_summary(PosixStats {
            per_file_ranks: vec![FileRankSpread {
                path: "/scratch/rank-files/data".to_string(),
                max_bytes_written: 1000,
                min_bytes_written: 100,
                max_bytes_read: 100,
                min_bytes_read: 90,
                ..Default::default()
            }],
            ..Default::default()
        });

        let finding = individual_write_imbalance(&summary, &Thresholds::default()).unwrap();
        assert_eq!(finding.code, "P21");
        assert!(individual_read_imbalance(&summary, &Thresholds::default()).is_none());
    }

    #[test]
    fn test_rules_abstain_without_posix() {
        let summary = TraceSummary::default();
        let thresholds = Thresholds::default();

        assert!(write_count_intensive(&summary, &thresholds).is_none());
        assert!(small_reads(&summary, &thresholds).is_none());
        assert!(long_metadata(&summary, &thresholds).is_none());
        assert!(shared_data_imbalance(&summary, &thresholds).is_none());
    }
}
