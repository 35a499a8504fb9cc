//! Lint engine.
//!
//! Runs every enabled rule of a [`ResolvedConfig`] over one document and
//! aggregates the findings. Rules are independent, so the engine can
//! dispatch them onto the rayon pool or run them in order; both produce the
//! same result because findings are stably sorted at the end.
//!
//! A rule that returns an error or panics does not abort the run. Its
//! partial output is dropped and a single [`Severity::Error`] finding is
//! recorded in its place.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use super::finding::Finding;
use super::options::RuleOptions;
use super::registry::{RuleDescriptor, RuleRegistry};
use super::rule::{RuleId, Severity};
use crate::document::Document;
use crate::error::{MdguardError, Result};
use crate::policy::ResolvedConfig;

/// How the engine schedules rule invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    /// One rule after another on the calling thread.
    Sequential,
    /// Rules fan out over the rayon thread pool.
    #[default]
    Parallel,
}

/// Cooperative cancellation flag shared between a caller and a lint run.
///
/// The engine checks the token before each rule invocation; a rule that is
/// already running finishes.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a lint run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintResult {
    /// Findings ordered by line, column and rule id.
    pub findings: Vec<Finding>,
    /// Set when the run was cancelled before every rule ran.
    pub partial: bool,
}

impl LintResult {
    /// Check if there are no findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Check if any finding has error severity.
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|finding| finding.severity == Severity::Error)
    }

    /// Number of findings with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }

    /// Process exit code for this result.
    ///
    /// `0` when nothing at error severity was found (and, with `strict`,
    /// nothing at warning severity either), `1` otherwise.
    pub fn exit_code(&self, strict: bool) -> u8 {
        let failed = self.has_errors() || (strict && self.count(Severity::Warning) > 0);
        u8::from(failed)
    }
}

enum RuleOutcome {
    Completed(Vec<Finding>),
    Failed(Finding),
    Skipped,
}

/// Runs enabled rules over documents.
pub struct LintEngine<'r> {
    registry: &'r RuleRegistry,
    execution: Execution,
}

impl<'r> LintEngine<'r> {
    /// Create an engine over a registry, dispatching rules in parallel.
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            execution: Execution::default(),
        }
    }

    /// Choose how rules are scheduled.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Lint a document with the given configuration.
    pub fn lint(&self, document: &Document, config: &ResolvedConfig) -> LintResult {
        self.lint_with_cancel(document, config, &CancellationToken::new())
    }

    /// Lint a document, stopping early once `token` is cancelled.
    pub fn lint_with_cancel(
        &self,
        document: &Document,
        config: &ResolvedConfig,
        token: &CancellationToken,
    ) -> LintResult {
        let enabled: Vec<(&RuleDescriptor, &RuleOptions)> = self
            .registry
            .iter()
            .filter_map(|descriptor| {
                config
                    .get(descriptor.id())
                    .filter(|settings| settings.enabled)
                    .map(|settings| (descriptor, &settings.options))
            })
            .collect();

        tracing::debug!(
            "Linting with {} rules ({:?})",
            enabled.len(),
            self.execution
        );

        let outcomes: Vec<RuleOutcome> = match self.execution {
            Execution::Sequential => enabled
                .iter()
                .map(|(descriptor, options)| run_rule(descriptor, document, options, token))
                .collect(),
            Execution::Parallel => enabled
                .par_iter()
                .map(|(descriptor, options)| run_rule(descriptor, document, options, token))
                .collect(),
        };

        let mut result = LintResult::default();
        let mut failures = 0;
        for outcome in outcomes {
            match outcome {
                RuleOutcome::Completed(findings) => result.findings.extend(findings),
                RuleOutcome::Failed(finding) => {
                    failures += 1;
                    result.findings.push(finding);
                }
                RuleOutcome::Skipped => result.partial = true,
            }
        }
        result.findings.sort_by(Finding::position_cmp);

        tracing::info!(
            "Lint finished: {} findings, {} rule failures{}",
            result.findings.len(),
            failures,
            if result.partial { " (cancelled)" } else { "" }
        );
        result
    }
}

fn run_rule(
    descriptor: &RuleDescriptor,
    document: &Document,
    options: &RuleOptions,
    token: &CancellationToken,
) -> RuleOutcome {
    let id = descriptor.id();
    if token.is_cancelled() {
        tracing::debug!("Skipping rule {}: run cancelled", id);
        return RuleOutcome::Skipped;
    }

    tracing::debug!("Running rule {}", id);
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        collect_findings(descriptor, document, options)
    }));

    let message = match outcome {
        Ok(Ok(findings)) => {
            tracing::debug!("Rule {} produced {} findings", id, findings.len());
            return RuleOutcome::Completed(findings);
        }
        Ok(Err(MdguardError::RuleExecution { message, .. })) => message,
        Ok(Err(err)) => err.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload)),
    };

    tracing::warn!("Rule {} failed: {}", id, message);
    RuleOutcome::Failed(Finding::new(
        id.clone(),
        Severity::Error,
        1,
        format!("rule execution failed: {}", message),
    ))
}

/// Drain a rule's findings, failing on the first error.
fn collect_findings(
    descriptor: &RuleDescriptor,
    document: &Document,
    options: &RuleOptions,
) -> Result<Vec<Finding>> {
    let id = descriptor.id();
    let mut findings = Vec::new();
    for item in descriptor.rule().check(document, options) {
        let finding = item?;
        if finding.rule_id != *id {
            return Err(foreign_finding(id, &finding));
        }
        findings.push(finding);
    }
    Ok(findings)
}

fn foreign_finding(id: &RuleId, finding: &Finding) -> MdguardError {
    MdguardError::RuleExecution {
        rule: id.to_string(),
        message: format!("reported a finding for rule {}", finding.rule_id),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(message) => (*message).to_string(),
            Err(_) => "no panic message".to_string(),
        },
    }
}
