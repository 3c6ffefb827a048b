//! CLI command implementations.
//!
//! Commands orchestrate the library components: the loader, the rule
//! engine, and the report exporters.

pub mod analyze;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args, AnalyzeArgs};
