//! Configuration and constants for the CLI.

/// Current report layout version, shown in the report header
pub const REPORT_VERSION: &str = "0.5";

/// Maximum number of per-file detail lines attached to a single finding
pub const DETAILS_MAX_SIZE: usize = 10;

/// Console width used for report panels and exported pages
pub const REPORT_WIDTH: usize = 100;
