//! JSON output formatter.
//!
//! Formats lint findings as machine-readable JSON for tooling integration.

use super::LintFormatter;
use crate::lint::{LintResult, Severity};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    file: String,
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    rule_id: String,
    severity: &'static str,
    message: String,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    hints: usize,
    partial: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        source: &Path,
        result: &LintResult,
        writer: &mut W,
    ) -> std::io::Result<()> {
        let diagnostics: Vec<_> = result
            .findings
            .iter()
            .map(|f| JsonDiagnostic {
                rule_id: f.rule_id.to_string(),
                severity: f.severity.as_str(),
                message: f.message.clone(),
                line: f.line,
                column: f.column,
                suggestion: f.suggestion.clone(),
            })
            .collect();

        let output = JsonOutput {
            file: source.display().to_string(),
            diagnostics,
            summary: JsonSummary {
                total: result.findings.len(),
                errors: result.count(Severity::Error),
                warnings: result.count(Severity::Warning),
                hints: result.count(Severity::Hint),
                partial: result.partial,
            },
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}
