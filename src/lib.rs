//! IO Insights
//!
//! Detects common I/O performance pitfalls in parallel application traces.
//! A trace summary is loaded and aggregated, a catalog of rules is evaluated
//! against it, and the resulting findings are rendered as an actionable
//! report with remediation snippets.

pub mod commands;
pub mod loader;
pub mod report;
pub mod rules;
pub mod utils;
