//! Lint rule definitions.
//!
//! This module provides the core traits and types for defining lint rules:
//!
//! - [`LintRule`] - The trait that all lint rules must implement
//! - [`RuleId`] - Unique identifier for a lint rule
//! - [`Severity`] - Severity level for findings (Hint, Warning, Error)

use super::finding::Finding;
use super::options::{OptionSchema, RuleOptions};
use crate::document::Document;
use crate::error::{MdguardError, Result};

/// Unique identifier for a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity level for lint findings.
///
/// Built-in rules report [`Severity::Warning`]. [`Severity::Error`] marks a
/// rule that failed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational hint, does not affect validity.
    Hint,
    /// Style violation that should be addressed.
    Warning,
    /// A rule failed to execute.
    Error,
}

impl Severity {
    /// Lower-case name used by the output formats.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hint => "hint",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lazy, single-pass sequence of findings produced by one rule invocation.
pub type FindingIter<'a> = Box<dyn Iterator<Item = Result<Finding>> + 'a>;

/// A lint rule that checks a Markdown document.
///
/// Rules are pure: `check` reads the document and its options and yields
/// findings. A rule keeps no state between invocations, so the engine can
/// run many rules on one document concurrently.
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> RuleId;

    /// Alternative identifiers accepted in policies.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Human-readable name of the rule.
    fn name(&self) -> &str;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Severity of findings from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Whether the rule is active when a policy sets no base directive.
    fn default_enabled(&self) -> bool {
        true
    }

    /// Options this rule accepts, with their defaults.
    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new()
    }

    /// Check the document and yield any findings.
    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a>;

    /// Build a finding attributed to this rule.
    fn finding(&self, line: usize, message: impl Into<String>) -> Finding
    where
        Self: Sized,
    {
        Finding::new(self.id(), self.default_severity(), line, message)
    }
}

/// Wrap a single error as a finding sequence.
pub fn failed<'a>(err: MdguardError) -> FindingIter<'a> {
    Box::new(std::iter::once(Err(err)))
}
