//! Human-readable output formatter.
//!
//! Formats lint findings for terminal display.

use super::LintFormatter;
use crate::lint::{LintResult, Severity};
use std::io::Write;
use std::path::Path;

/// Formats lint output for human consumption.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new() -> Self {
        Self
    }
}

impl LintFormatter for HumanFormatter {
    fn format<W: Write>(
        &self,
        source: &Path,
        result: &LintResult,
        writer: &mut W,
    ) -> std::io::Result<()> {
        for finding in &result.findings {
            // Header line: warning[RULE_ID]: message
            writeln!(
                writer,
                "{}[{}]: {}",
                finding.severity, finding.rule_id, finding.message
            )?;

            match finding.column {
                Some(column) => writeln!(
                    writer,
                    "  --> {}:{}:{}",
                    source.display(),
                    finding.line,
                    column
                )?,
                None => writeln!(writer, "  --> {}:{}", source.display(), finding.line)?,
            }

            if let Some(ref suggestion) = finding.suggestion {
                writeln!(writer, "   = help: {}", suggestion)?;
            }

            writeln!(writer)?;
        }

        let error_count = result.count(Severity::Error);
        let warning_count = result.count(Severity::Warning);

        if error_count > 0 || warning_count > 0 {
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                error_count, warning_count
            )?;
        }

        if result.partial {
            writeln!(writer, "note: lint run was cancelled; results are incomplete")?;
        }

        Ok(())
    }
}
