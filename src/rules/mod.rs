//! The rule catalog: pure checks that turn a trace summary into findings.
//!
//! Findings carry full file paths in their detail lines; abbreviation is a
//! rendering concern and happens in the report formatter.

pub mod engine;
pub mod finding;
pub mod interface;
pub mod mpiio;
pub mod posix;
pub mod snippets;
pub mod thresholds;

pub use engine::{evaluate, Rule, CATALOG};
pub use finding::{Category, Finding, Recommendation, Severity, Target};
pub use thresholds::Thresholds;
