//! Lint output formatters.
//!
//! This module provides formatters for outputting lint results
//! in different formats (human-readable, JSON, SARIF).

pub mod human;
pub mod json;
pub mod sarif;

use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::MdguardError;
use crate::lint::LintResult;

/// Output format for lint results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Sarif,
}

impl FromStr for OutputFormat {
    type Err = MdguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(anyhow::anyhow!("unknown output format '{}'", other).into()),
        }
    }
}

/// Trait for formatting lint output.
pub trait LintFormatter {
    /// Format the result of linting `source` to the given writer.
    fn format<W: Write>(
        &self,
        source: &Path,
        result: &LintResult,
        writer: &mut W,
    ) -> std::io::Result<()>;
}

/// Write a result in the chosen format.
pub fn write_result<W: Write>(
    format: OutputFormat,
    source: &Path,
    result: &LintResult,
    writer: &mut W,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => HumanFormatter::new().format(source, result, writer),
        OutputFormat::Json => JsonFormatter::new().format(source, result, writer),
        OutputFormat::Sarif => SarifFormatter::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            .format(source, result, writer),
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
