//! Lint findings.
//!
//! This module provides the [`Finding`] type for representing a rule
//! violation at a document location.

use std::cmp::Ordering;

use super::rule::{RuleId, Severity};

/// A violation reported by a lint rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The rule that produced this finding.
    pub rule_id: RuleId,
    /// Source line (1-indexed).
    pub line: usize,
    /// Source column (1-indexed), when the rule can point inside the line.
    pub column: Option<usize>,
    /// Human-readable message.
    pub message: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Optional suggestion for fixing the issue.
    pub suggestion: Option<String>,
}

impl Finding {
    /// Create a new finding.
    pub fn new(
        rule_id: RuleId,
        severity: Severity,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            line,
            column: None,
            message: message.into(),
            severity,
            suggestion: None,
        }
    }

    /// Point this finding at a column.
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Add a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Result ordering: line, then column (no column first), then rule id.
    pub fn position_cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column, &self.rule_id).cmp(&(other.line, other.column, &other.rule_id))
    }
}
