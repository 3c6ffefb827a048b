//! Numeric thresholds used by the rule catalog.
//!
//! These are fixed constants passed explicitly into the engine, not
//! process-wide state. The defaults match the values the heuristics were
//! tuned with; fractions are in the 0..=1 range.

/// Thresholds for every rule in the catalog
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Read/write imbalance fraction for the intensity checks
    pub imbalance_operations: f64,
    /// Fraction of requests below 1 MB considered excessive
    pub small_requests: f64,
    /// Absolute number of small requests required before firing
    pub small_requests_absolute: u64,
    /// Fraction of misaligned requests considered excessive
    pub misaligned_requests: f64,
    /// Per-rank metadata time considered excessive, seconds
    pub metadata_time_rank: f64,
    /// Fraction of random accesses considered excessive
    pub random_operations: f64,
    /// Absolute number of random accesses required before firing
    pub random_operations_absolute: u64,
    /// Shared-file straggler imbalance fraction
    pub imbalance_stragglers: f64,
    /// Per-file rank imbalance fraction for individually opened files
    pub imbalance_size: f64,
    /// Fraction of bytes moved through STDIO considered excessive
    pub interface_stdio: f64,
    /// Fraction of independent operations considered excessive per file
    pub collective_operations: f64,
    /// Absolute number of operations before collective checks fire
    pub collective_operations_absolute: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            imbalance_operations: 0.1,
            small_requests: 0.1,
            small_requests_absolute: 1000,
            misaligned_requests: 0.1,
            metadata_time_rank: 30.0,
            random_operations: 0.2,
            random_operations_absolute: 1000,
            imbalance_stragglers: 0.15,
            imbalance_size: 0.3,
            interface_stdio: 0.1,
            collective_operations: 0.5,
            collective_operations_absolute: 1000,
        }
    }
}

impl Thresholds {
    /// Check that every fraction is within 0..=1 and times are non-negative
    pub fn validate(&self) -> Result<(), String> {
        let fractions = [
            ("imbalance_operations", self.imbalance_operations),
            ("small_requests", self.small_requests),
            ("misaligned_requests", self.misaligned_requests),
            ("random_operations", self.random_operations),
            ("imbalance_stragglers", self.imbalance_stragglers),
            ("imbalance_size", self.imbalance_size),
            ("interface_stdio", self.interface_stdio),
            ("collective_operations", self.collective_operations),
        ];

        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("threshold {} must be within 0..=1", name));
            }
        }

        if self.metadata_time_rank < 0.0 {
            return Err("threshold metadata_time_rank must be non-negative".to_string());
        }

        Ok(())
    }
}
