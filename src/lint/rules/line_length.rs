//! Maximum line length.

use std::collections::HashSet;

use crate::document::Document;
use crate::lint::{FindingIter, LintRule, OptionSchema, RuleId, RuleOptions};

const DEFAULT_LINE_LENGTH: i64 = 80;

/// Flags lines longer than the configured maximum.
///
/// Length counts characters, not bytes. The finding points at the first
/// character past the limit.
pub struct LineLengthRule;

impl LintRule for LineLengthRule {
    fn id(&self) -> RuleId {
        RuleId::new("LINE_LENGTH")
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["MD013"]
    }

    fn name(&self) -> &str {
        "Line Length"
    }

    fn description(&self) -> &str {
        "Lines do not exceed the configured length"
    }

    fn option_schema(&self) -> OptionSchema {
        OptionSchema::new()
            .integer(
                "line_length",
                1,
                i64::MAX,
                DEFAULT_LINE_LENGTH,
                "Maximum characters per line",
            )
            .boolean("code_blocks", true, "Also check lines in code blocks")
            .boolean("headings", true, "Also check heading lines")
    }

    fn check<'a>(&'a self, document: &'a Document, options: &'a RuleOptions) -> FindingIter<'a> {
        let max = options
            .int("line_length")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_LINE_LENGTH as usize);
        let code_blocks = options.bool("code_blocks").unwrap_or(true);
        let heading_lines: HashSet<usize> = if options.bool("headings").unwrap_or(true) {
            HashSet::new()
        } else {
            document
                .headings()
                .flat_map(|heading| heading.line..=heading.end_line)
                .collect()
        };

        Box::new(document.lines().iter().filter_map(move |line| {
            if (line.in_code && !code_blocks) || heading_lines.contains(&line.number) {
                return None;
            }

            let length = line.text.chars().count();
            if length <= max {
                return None;
            }

            Some(Ok(self
                .finding(
                    line.number,
                    format!("Line length is {}, exceeds maximum of {}", length, max),
                )
                .with_column(max + 1)))
        }))
    }
}
