//! Finding data model produced by the rule engine.

/// Severity of a finding
///
/// `High` and `Warn` count towards the issue totals in the report footer;
/// `Info` and `Ok` are informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    High,
    Warn,
    Info,
    Ok,
}

/// Audience a recommendation is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    User,
    Developer,
    System,
}

/// Report panel a finding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Metadata,
    Operation,
}

/// One suggested remediation, optionally backed by a code snippet
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub message: String,
    pub snippet: Option<&'static str>,
}

impl Recommendation {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            snippet: None,
        }
    }

    pub fn with_snippet(message: impl Into<String>, snippet: &'static str) -> Self {
        Self {
            message: message.into(),
            snippet: Some(snippet),
        }
    }
}

/// Result of one rule firing: a detected issue with its recommendations
///
/// Immutable once created by the engine; the formatter only reads it.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Stable rule identifier (e.g. "P05")
    pub code: &'static str,
    pub target: Target,
    pub severity: Severity,
    pub category: Category,
    /// Human-readable description of the detected issue
    pub issue: String,
    /// Per-file detail lines, capped at display time
    pub details: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl Finding {
    pub fn new(
        code: &'static str,
        target: Target,
        severity: Severity,
        category: Category,
        issue: impl Into<String>,
    ) -> Self {
        Self {
            code,
            target,
            severity,
            category,
            issue: issue.into(),
            details: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = recommendations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_builder() {
        let finding = Finding::new(
            "P05",
            Target::Developer,
            Severity::High,
            Category::Operation,
            "too many small reads",
        )
        .with_recommendations(vec![Recommendation::text("buffer your reads")]);

        assert_eq!(finding.code, "P05");
        assert_eq!(finding.severity, Severity::High);
        assert_eq!(finding.recommendations.len(), 1);
        assert!(finding.recommendations[0].snippet.is_none());
    }
}
